use feed_reader::{DirectionType, RawRoute, RawStop, RawTrip, RouteType};

use crate::error::Result;
use crate::headsigns::HeadsignRules;
use crate::labels;
use crate::model::{AgencyInfo, CanonicalRoute, CanonicalStop};
use crate::routes::{ColorTable, RouteIdRules};
use crate::splitting::RouteTripSpecs;
use crate::stops::StopIdRules;

pub const AGENCY_NAME: &str = "CITCRC";
pub const AGENCY_COLOR: &str = "1F1F1F";

/// Every agency specific rule, consumed by the generic generator
#[derive(Debug, Clone)]
pub struct AgencyTools {
    pub name: &'static str,
    pub color: &'static str,
    pub route_type: RouteType,
    pub route_ids: RouteIdRules,
    pub colors: ColorTable,
    pub stop_ids: StopIdRules,
    pub headsigns: HeadsignRules,
    pub trip_specs: RouteTripSpecs,
}

impl AgencyTools {
    /// Chambly, Richelieu, Carignan buses
    pub fn citcrc() -> Self {
        Self {
            name: AGENCY_NAME,
            color: AGENCY_COLOR,
            route_type: RouteType::Bus,
            route_ids: RouteIdRules::citcrc(),
            colors: ColorTable::citcrc(),
            stop_ids: StopIdRules::citcrc(),
            headsigns: HeadsignRules::citcrc(),
            trip_specs: RouteTripSpecs::citcrc(),
        }
    }

    pub fn good_enough_accepted(mut self, accepted: bool) -> Self {
        self.headsigns = self.headsigns.good_enough_accepted(accepted);
        self
    }

    pub fn agency_info(&self) -> AgencyInfo {
        AgencyInfo {
            name: self.name.to_owned(),
            color: self.color.to_owned(),
            route_type: self.route_type,
        }
    }

    pub fn route(&self, route: &RawRoute) -> Result<CanonicalRoute> {
        Ok(CanonicalRoute {
            id: self.route_ids.resolve(route)?,
            short_name: route.short_name.clone(),
            long_name: labels::normalize_route_long_name(&route.long_name),
            color: self.colors.resolve(route)?,
        })
    }

    /// Cleaned and overridden headsign of a trip, before merging
    pub fn trip_headsign(&self, route_id: i64, trip: &RawTrip) -> String {
        let cleaned = labels::normalize_headsign(trip.headsign.as_deref().unwrap_or_default());
        self.headsigns
            .apply_overrides(route_id, direction_of(trip), cleaned)
    }

    pub fn stop(&self, stop: &RawStop) -> Result<CanonicalStop> {
        Ok(CanonicalStop {
            id: self.stop_ids.resolve(stop)?,
            code: self.stop_ids.stop_code(stop),
            name: labels::normalize_stop_name(&stop.name),
            latitude: stop.latitude,
            longitude: stop.longitude,
        })
    }
}

/// Trips without a direction are outbound
pub fn direction_of(trip: &RawTrip) -> DirectionType {
    trip.direction_id.unwrap_or_default()
}
