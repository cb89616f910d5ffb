use feed_reader::{DirectionType, RawRoute, RawStop};
use std::fmt;
use thiserror::Error;

use crate::model::CanonicalTrip;

/// Why a stop identifier could not be derived from its code or raw id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopIdFailure {
    /// The stop code is present but is not a number
    InvalidCode,
    /// The raw id has no digits to build the id from
    NoDigits,
    /// The digits do not fit in a sub-band
    DigitsOutOfBand,
    /// The raw id does not start with a known prefix
    UnknownPrefix,
    /// The raw id does not end with a known suffix
    UnknownSuffix,
}

impl fmt::Display for StopIdFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            StopIdFailure::InvalidCode => "stop code is not numeric",
            StopIdFailure::NoDigits => "no digits in stop id",
            StopIdFailure::DigitsOutOfBand => {
                "digits above 999 would overlap the next sub-band"
            }
            StopIdFailure::UnknownPrefix => "unknown start with",
            StopIdFailure::UnknownSuffix => "unknown end with",
        };
        f.write_str(reason)
    }
}

/// Why a route identifier could not be derived from its short name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteIdFailure {
    /// Neither all digits nor a known class letter followed by digits
    UnknownShortName,
    /// A plain number that would collide with a class band
    NumberInClassBand,
    /// Something follows the digits of a class short name, as in `T3A`
    TrailingCharacters,
    /// The digits of a class short name do not fit in its band
    DigitsOutOfBand,
}

impl fmt::Display for RouteIdFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            RouteIdFailure::UnknownShortName => "short name is not a number nor a known class",
            RouteIdFailure::NumberInClassBand => {
                "plain numbers must stay below the lowest class offset or they overlap a class band"
            }
            RouteIdFailure::TrailingCharacters => {
                "only digits may follow the class letter, a suffix has no band"
            }
            RouteIdFailure::DigitsOutOfBand => "digits after the class letter must stay below 10000 or they overlap the next band",
        };
        f.write_str(reason)
    }
}

fn trips_detail(trips: &[CanonicalTrip]) -> String {
    trips
        .iter()
        .map(|trip| format!("{trip:?}"))
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Conditions that abort the whole run
///
/// Every unexpected-input variant carries the offending raw entity so the
/// rule tables can be extended from the message alone.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unexpected route ID ({reason}) for {route}!")]
    UnexpectedRouteId {
        route: Box<RawRoute>,
        reason: RouteIdFailure,
    },

    #[error("Unexpected route color for {route}!")]
    UnexpectedRouteColor { route: Box<RawRoute> },

    #[error("Stop doesn't have an ID ({reason})! {stop}")]
    UnexpectedStopId {
        stop: Box<RawStop>,
        reason: StopIdFailure,
    },

    #[error("Unexpected trips to merge on route {route_id} direction {direction_id}: {}!", trips_detail(.trips))]
    UnexpectedMerge {
        route_id: i64,
        direction_id: DirectionType,
        trips: Vec<CanonicalTrip>,
    },

    #[error("Route ID {id} is produced by both {first} and {second}")]
    DuplicateRouteId {
        id: i64,
        first: String,
        second: String,
    },

    #[error("Stop ID {id} is produced by both {first} and {second}")]
    DuplicateStopId { id: u32, first: String, second: String },

    #[error("Trip {trip_id} references unknown route {route_id}")]
    UnknownRoute { trip_id: String, route_id: String },

    #[error(transparent)]
    Feed(#[from] feed_reader::Error),

    #[error("impossible to write '{file_name}'")]
    Io {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
