//! Applies an [AgencyTools] policy to a raw feed
use feed_reader::{DirectionType, RawFeed};
use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, BTreeSet};

use crate::agency::{direction_of, AgencyTools};
use crate::error::{Error, Result};
use crate::exclusions::ServiceFilter;
use crate::model::{CanonicalRoute, CanonicalStop, CanonicalTrip, GeneratedFeed};

pub fn generate(feed: &RawFeed, tools: &AgencyTools, filter: &ServiceFilter) -> Result<GeneratedFeed> {
    let mut generated = GeneratedFeed::empty(tools.agency_info());
    if filter.excluding_all() {
        warn!("No service runs in the selected period, nothing to generate");
        return Ok(generated);
    }

    generated.calendars = feed
        .calendar
        .iter()
        .filter(|c| !filter.exclude_calendar(c))
        .cloned()
        .collect();
    generated.calendar_dates = feed
        .calendar_dates
        .iter()
        .filter(|c| !filter.exclude_calendar_date(c))
        .cloned()
        .collect();

    let routes = resolve_routes(feed, tools, filter)?;

    let mut kept_trip_ids: FxHashSet<&str> = FxHashSet::default();
    let mut served_routes: BTreeSet<i64> = BTreeSet::new();
    let mut headsigns: BTreeMap<(i64, DirectionType), BTreeSet<String>> = BTreeMap::new();
    let mut trips: BTreeSet<CanonicalTrip> = BTreeSet::new();

    for trip in &feed.trips {
        if filter.exclude_trip(trip) {
            continue;
        }
        let route_id = match routes.get(trip.route_id.as_str()) {
            Some(Some(route)) => route.id,
            // excluded route
            Some(None) => continue,
            None => {
                return Err(Error::UnknownRoute {
                    trip_id: trip.id.clone(),
                    route_id: trip.route_id.clone(),
                })
            }
        };
        kept_trip_ids.insert(trip.id.as_str());
        served_routes.insert(route_id);

        if let Some(split) = tools.trip_specs.split_trip(route_id) {
            trips.extend(split);
            continue;
        }
        headsigns
            .entry((route_id, direction_of(trip)))
            .or_default()
            .insert(tools.trip_headsign(route_id, trip));
    }

    for ((route_id, direction_id), observed) in &headsigns {
        let headsign = tools.headsigns.reconcile(*route_id, *direction_id, observed)?;
        trips.insert(CanonicalTrip {
            route_id: *route_id,
            direction_id: *direction_id,
            headsign,
        });
    }

    generated.routes = served_only(routes, &served_routes);
    generated.trips = trips.into_iter().collect();
    generated.stops = resolve_stops(feed, tools, &kept_trip_ids)?;

    info!(
        "Generated {} routes, {} trips, {} stops, {} calendars, {} calendar dates",
        generated.routes.len(),
        generated.trips.len(),
        generated.stops.len(),
        generated.calendars.len(),
        generated.calendar_dates.len()
    );
    Ok(generated)
}

/// Raw route id to canonical route, `None` for excluded routes
///
/// Every route is resolved, id and colour, even when none of its trips is kept, so a
/// broken rule table is noticed whatever the selected period.
fn resolve_routes<'a>(
    feed: &'a RawFeed,
    tools: &AgencyTools,
    filter: &ServiceFilter,
) -> Result<FxHashMap<&'a str, Option<CanonicalRoute>>> {
    let mut routes = FxHashMap::default();
    let mut producers: FxHashMap<i64, &str> = FxHashMap::default();
    for route in &feed.routes {
        if filter.exclude_route(route) {
            routes.insert(route.id.as_str(), None);
            continue;
        }
        let canonical = tools.route(route)?;
        if let Some(first) = producers.insert(canonical.id, &route.short_name) {
            return Err(Error::DuplicateRouteId {
                id: canonical.id,
                first: first.to_owned(),
                second: route.short_name.clone(),
            });
        }
        routes.insert(route.id.as_str(), Some(canonical));
    }
    Ok(routes)
}

fn served_only(
    routes: FxHashMap<&str, Option<CanonicalRoute>>,
    served_routes: &BTreeSet<i64>,
) -> Vec<CanonicalRoute> {
    let mut canonical: Vec<CanonicalRoute> = routes
        .into_iter()
        .filter_map(|(raw_id, route)| match route {
            Some(route) if served_routes.contains(&route.id) => Some(route),
            _ => {
                debug!("route {} has no trip in the selected period", raw_id);
                None
            }
        })
        .collect();
    canonical.sort_by_key(|route| route.id);
    canonical
}

/// Stops served by a kept trip, or every stop when the feed has no stop times
fn resolve_stops(
    feed: &RawFeed,
    tools: &AgencyTools,
    kept_trip_ids: &FxHashSet<&str>,
) -> Result<Vec<CanonicalStop>> {
    let served: Option<FxHashSet<&str>> = if feed.stop_times.is_empty() {
        None
    } else {
        Some(
            feed.stop_times
                .iter()
                .filter(|st| kept_trip_ids.contains(st.trip_id.as_str()))
                .map(|st| st.stop_id.as_str())
                .collect(),
        )
    };

    let mut stops = Vec::new();
    let mut producers: FxHashMap<u32, &str> = FxHashMap::default();
    for stop in &feed.stops {
        if let Some(served) = &served {
            if !served.contains(stop.id.as_str()) {
                continue;
            }
        }
        let canonical = tools.stop(stop)?;
        if let Some(first) = producers.insert(canonical.id, &stop.id) {
            return Err(Error::DuplicateStopId {
                id: canonical.id,
                first: first.to_owned(),
                second: stop.id.clone(),
            });
        }
        stops.push(canonical);
    }
    stops.sort_by_key(|stop| stop.id);
    Ok(stops)
}
