use feed_reader::{DirectionType, RawCalendar, RawCalendarDate, RouteType};
use serde::Serialize;

/// A route as the downstream builder expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRoute {
    pub id: i64,
    pub short_name: String,
    pub long_name: String,
    /// `RRGGBB`, no leading `#`
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalStop {
    pub id: u32,
    /// Empty when the feed has no real code for the stop
    pub code: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One direction of a route, labelled with its reconciled headsign
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CanonicalTrip {
    pub route_id: i64,
    pub direction_id: DirectionType,
    pub headsign: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgencyInfo {
    pub name: String,
    pub color: String,
    pub route_type: RouteType,
}

/// Everything a run produces
#[derive(Debug, Serialize)]
pub struct GeneratedFeed {
    pub agency: AgencyInfo,
    pub routes: Vec<CanonicalRoute>,
    pub trips: Vec<CanonicalTrip>,
    pub stops: Vec<CanonicalStop>,
    pub calendars: Vec<RawCalendar>,
    pub calendar_dates: Vec<RawCalendarDate>,
}

impl GeneratedFeed {
    pub fn empty(agency: AgencyInfo) -> Self {
        Self {
            agency,
            routes: Vec::new(),
            trips: Vec::new(),
            stops: Vec::new(),
            calendars: Vec::new(),
            calendar_dates: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.trips.is_empty() && self.stops.is_empty()
    }
}
