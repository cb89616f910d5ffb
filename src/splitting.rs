//! Route-keyed trip split specifications
//!
//! A route listed here gets its trips from the specification instead of from its raw
//! headsigns, so headsign cleaning and merging never run for it.
use feed_reader::DirectionType;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

use crate::model::CanonicalTrip;

/// One direction of a split route: its headsign and its stops, in travel order
#[derive(Debug, Clone)]
pub struct DirectionSpec {
    pub direction_id: DirectionType,
    pub headsign: String,
    pub stop_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTripSpec {
    directions: Vec<DirectionSpec>,
}

impl RouteTripSpec {
    pub fn new(directions: Vec<DirectionSpec>) -> Self {
        Self { directions }
    }

    fn position(&self, direction: &DirectionSpec, stop_id: &str) -> Option<usize> {
        direction.stop_ids.iter().position(|id| id == stop_id)
    }
}

/// Where a stop lands in a split route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitStop {
    pub direction_id: DirectionType,
    pub stop_sequence: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTripSpecs(FxHashMap<i64, RouteTripSpec>);

impl RouteTripSpecs {
    /// CITCRC has no split route at the moment
    pub fn citcrc() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route_id: i64, spec: RouteTripSpec) -> Self {
        self.0.insert(route_id, spec);
        self
    }

    pub fn contains(&self, route_id: i64) -> bool {
        self.0.contains_key(&route_id)
    }

    /// Every trip of a split route, `None` when the route is not split
    pub fn split_trip(&self, route_id: i64) -> Option<Vec<CanonicalTrip>> {
        let spec = self.0.get(&route_id)?;
        Some(
            spec.directions
                .iter()
                .map(|direction| CanonicalTrip {
                    route_id,
                    direction_id: direction.direction_id,
                    headsign: direction.headsign.clone(),
                })
                .collect(),
        )
    }

    /// The split trips a stop belongs to, `None` when the route is not split
    pub fn split_trip_stop(&self, route_id: i64, stop_id: &str) -> Option<Vec<SplitStop>> {
        let spec = self.0.get(&route_id)?;
        Some(
            spec.directions
                .iter()
                .filter_map(|direction| {
                    spec.position(direction, stop_id).map(|index| SplitStop {
                        direction_id: direction.direction_id,
                        stop_sequence: index + 1,
                    })
                })
                .collect(),
        )
    }

    /// Orders two stops of a split route direction, `None` leaves the ordering to the caller
    pub fn compare_early(
        &self,
        route_id: i64,
        direction_id: DirectionType,
        stop_a: &str,
        stop_b: &str,
    ) -> Option<Ordering> {
        let spec = self.0.get(&route_id)?;
        let direction = spec
            .directions
            .iter()
            .find(|d| d.direction_id == direction_id)?;
        let a = spec.position(direction, stop_a)?;
        let b = spec.position(direction, stop_b)?;
        Some(a.cmp(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loop_route() -> RouteTripSpecs {
        let stops = |ids: &[&str]| -> Vec<String> { ids.iter().map(|id| id.to_string()).collect() };
        RouteTripSpecs::default().with_route(
            20_003,
            RouteTripSpec::new(vec![
                DirectionSpec {
                    direction_id: DirectionType::Outbound,
                    headsign: "Chambly".to_owned(),
                    stop_ids: stops(&["CHB1A", "CHB2A", "CHB3A"]),
                },
                DirectionSpec {
                    direction_id: DirectionType::Inbound,
                    headsign: "Stat Incitatif".to_owned(),
                    stop_ids: stops(&["CHB3A", "CHB4B", "CHB1A"]),
                },
            ]),
        )
    }

    #[test]
    fn citcrc_has_no_split_route() {
        let specs = RouteTripSpecs::citcrc();
        assert!(!specs.contains(20_003));
        assert_eq!(None, specs.split_trip(20_003));
        assert_eq!(None, specs.split_trip_stop(20_003, "CHB1A"));
        assert_eq!(None, specs.compare_early(20_003, DirectionType::Outbound, "A", "B"));
    }

    #[test]
    fn split_trips() {
        let specs = loop_route();
        let trips = specs.split_trip(20_003).unwrap();
        assert_eq!(2, trips.len());
        assert_eq!("Chambly", trips[0].headsign);
        assert_eq!(DirectionType::Inbound, trips[1].direction_id);
        assert_eq!(None, specs.split_trip(14));
    }

    #[test]
    fn split_trip_stops() {
        let specs = loop_route();
        assert_eq!(
            vec![
                SplitStop {
                    direction_id: DirectionType::Outbound,
                    stop_sequence: 1
                },
                SplitStop {
                    direction_id: DirectionType::Inbound,
                    stop_sequence: 3
                },
            ],
            specs.split_trip_stop(20_003, "CHB1A").unwrap()
        );
        assert!(specs.split_trip_stop(20_003, "LON1A").unwrap().is_empty());
    }

    #[test]
    fn early_comparison() {
        let specs = loop_route();
        let outbound = DirectionType::Outbound;
        assert_eq!(
            Some(Ordering::Less),
            specs.compare_early(20_003, outbound, "CHB1A", "CHB3A")
        );
        assert_eq!(
            Some(Ordering::Greater),
            specs.compare_early(20_003, DirectionType::Inbound, "CHB1A", "CHB3A")
        );
        assert_eq!(None, specs.compare_early(20_003, outbound, "CHB1A", "CHB4B"));
    }
}
