//! Literal headsign overrides and the per route and direction merge policy
use feed_reader::DirectionType;
use log::debug;
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::model::CanonicalTrip;
use crate::patterns::same_label;

const TAXIBUS: i64 = 20_000;
const STAT_INCITATIF: &str = "Stat Incitatif";

/// Replaces one cleaned headsign on one route direction
#[derive(Debug, Clone)]
pub struct HeadsignOverride {
    pub route_id: i64,
    pub direction_id: DirectionType,
    pub headsign: &'static str,
    pub replacement: &'static str,
}

/// When every headsign observed on a route direction is one of `variants`, they all become
/// `canonical`
#[derive(Debug, Clone)]
pub struct MergeRule {
    pub route_id: i64,
    pub variants: BTreeSet<&'static str>,
    pub canonical: &'static str,
}

impl MergeRule {
    fn new(route_id: i64, variants: &[&'static str], canonical: &'static str) -> Self {
        Self {
            route_id,
            variants: variants.iter().copied().collect(),
            canonical,
        }
    }

    fn covers(&self, route_id: i64, headsigns: &BTreeSet<String>) -> bool {
        self.route_id == route_id && headsigns.iter().all(|h| self.variants.contains(h.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct HeadsignRules {
    overrides: Vec<HeadsignOverride>,
    merges: Vec<MergeRule>,
    good_enough_accepted: bool,
}

impl HeadsignRules {
    pub fn new(overrides: Vec<HeadsignOverride>, merges: Vec<MergeRule>) -> Self {
        Self {
            overrides,
            merges,
            good_enough_accepted: true,
        }
    }

    pub fn citcrc() -> Self {
        let overrides = vec![HeadsignOverride {
            route_id: 14,
            direction_id: DirectionType::Inbound,
            headsign: "Richelieu-Chambly",
            replacement: "PM",
        }];
        let merges = vec![
            MergeRule::new(TAXIBUS + 3, &[STAT_INCITATIF, "Chambly"], "Chambly"),
            MergeRule::new(TAXIBUS + 4, &["Chemin Bellerive", STAT_INCITATIF], STAT_INCITATIF),
            MergeRule::new(TAXIBUS + 5, &[STAT_INCITATIF, "Route 112"], "Route 112"),
            MergeRule::new(14, &["AM", "Richelieu-Chambly", "Chambly"], "AM"),
            MergeRule::new(14, &["PM", "Richelieu-Chambly", "Richelieu"], "PM"),
            MergeRule::new(15, &["AM", "Marieville-Chambly", "Chambly"], "AM"),
            MergeRule::new(15, &["PM", "Marieville-Chambly", "Marieville"], "PM"),
        ];
        Self::new(overrides, merges)
    }

    /// Overrides are approximations, they are skipped when only exact labels are wanted
    pub fn good_enough_accepted(mut self, accepted: bool) -> Self {
        self.good_enough_accepted = accepted;
        self
    }

    pub fn apply_overrides(
        &self,
        route_id: i64,
        direction_id: DirectionType,
        headsign: String,
    ) -> String {
        if !self.good_enough_accepted {
            return headsign;
        }
        self.overrides
            .iter()
            .find(|o| {
                o.route_id == route_id
                    && o.direction_id == direction_id
                    && same_label(o.headsign, &headsign)
            })
            .map(|o| o.replacement.to_owned())
            .unwrap_or(headsign)
    }

    /// Merges two trips of the same route direction, in either order
    pub fn merge(&self, trip: &CanonicalTrip, other: &CanonicalTrip) -> Result<String> {
        let headsigns: BTreeSet<String> = [trip.headsign.clone(), other.headsign.clone()]
            .into_iter()
            .collect();
        self.reconcile(trip.route_id, trip.direction_id, &headsigns)
    }

    /// The single headsign for every distinct headsign seen on a route direction
    pub fn reconcile(
        &self,
        route_id: i64,
        direction_id: DirectionType,
        headsigns: &BTreeSet<String>,
    ) -> Result<String> {
        if headsigns.len() <= 1 {
            return Ok(headsigns.iter().next().cloned().unwrap_or_default());
        }
        match self.merges.iter().find(|rule| rule.covers(route_id, headsigns)) {
            Some(rule) => {
                debug!(
                    "route {} direction {}: {:?} merged into {}",
                    route_id, direction_id, headsigns, rule.canonical
                );
                Ok(rule.canonical.to_owned())
            }
            None => Err(Error::UnexpectedMerge {
                route_id,
                direction_id,
                trips: headsigns
                    .iter()
                    .map(|headsign| CanonicalTrip {
                        route_id,
                        direction_id,
                        headsign: headsign.clone(),
                    })
                    .collect(),
            }),
        }
    }
}
