use std::fmt;

/// `route_type` of a [crate::RawRoute]
///
/// Basic codes and the extended (hundreds) codes are folded into the same kinds.
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[derivative(Default)]
#[serde(from = "i32", into = "i32")]
pub enum RouteType {
    /// Tramway, streetcar, light rail
    Tramway,
    /// Metro
    Subway,
    /// Commuter and intercity trains
    Rail,
    /// Regular, express and taxibus services
    #[derivative(Default)]
    Bus,
    /// Boats
    Ferry,
    /// Anything else, with its code kept as is
    Other(i32),
}

impl From<i32> for RouteType {
    fn from(code: i32) -> Self {
        match code {
            0 | 900..=999 => RouteType::Tramway,
            1 | 400..=499 => RouteType::Subway,
            2 | 100..=199 => RouteType::Rail,
            3 | 200..=299 | 700..=899 => RouteType::Bus,
            4 | 1000..=1099 | 1200..=1299 => RouteType::Ferry,
            other => RouteType::Other(other),
        }
    }
}

impl From<RouteType> for i32 {
    fn from(route_type: RouteType) -> Self {
        route_type.code()
    }
}

impl RouteType {
    /// Basic GTFS code of the kind
    pub fn code(&self) -> i32 {
        match self {
            RouteType::Tramway => 0,
            RouteType::Subway => 1,
            RouteType::Rail => 2,
            RouteType::Bus => 3,
            RouteType::Ferry => 4,
            RouteType::Other(code) => *code,
        }
    }
}

/// `direction_id` of a [crate::RawTrip]
#[derive(Debug, Default, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DirectionType {
    /// `0`
    #[default]
    #[serde(rename = "0")]
    Outbound,
    /// `1`
    #[serde(rename = "1")]
    Inbound,
}

impl DirectionType {
    /// 0 or 1
    pub fn id(&self) -> u8 {
        match self {
            DirectionType::Outbound => 0,
            DirectionType::Inbound => 1,
        }
    }
}

impl fmt::Display for DirectionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// `exception_type` of a [crate::RawCalendarDate]
#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
pub enum Exception {
    /// `1`, the service runs that day
    #[serde(rename = "1")]
    Added,
    /// `2`, the service does not run that day
    #[serde(rename = "2")]
    Deleted,
}
