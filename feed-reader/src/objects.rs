use crate::enums::*;
use crate::serde_helpers::{date_format, empty_as_none, flag, optional_float};
use chrono::{Datelike, NaiveDate, Weekday};

use std::fmt;

/// A row of `calendar.txt`: the weekdays a service runs on, between two dates
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawCalendar {
    /// `service_id`
    #[serde(rename = "service_id")]
    pub id: String,
    /// `monday`
    #[serde(with = "flag")]
    pub monday: bool,
    /// `tuesday`
    #[serde(with = "flag")]
    pub tuesday: bool,
    /// `wednesday`
    #[serde(with = "flag")]
    pub wednesday: bool,
    /// `thursday`
    #[serde(with = "flag")]
    pub thursday: bool,
    /// `friday`
    #[serde(with = "flag")]
    pub friday: bool,
    /// `saturday`
    #[serde(with = "flag")]
    pub saturday: bool,
    /// `sunday`
    #[serde(with = "flag")]
    pub sunday: bool,
    /// First day of the service
    #[serde(with = "date_format")]
    pub start_date: NaiveDate,
    /// Last day of the service, included
    #[serde(with = "date_format")]
    pub end_date: NaiveDate,
}

impl fmt::Display for RawCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "service {} from {} to {}", self.id, self.start_date, self.end_date)
    }
}

impl RawCalendar {
    /// The weekday flag of `date`, whatever the interval
    pub fn valid_weekday(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Inside `[start_date, end_date]` and on a flagged weekday
    pub fn runs_on_date(&self, date: NaiveDate) -> bool {
        (self.start_date..=self.end_date).contains(&date) && self.valid_weekday(date)
    }
}

/// A row of `calendar_dates.txt`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawCalendarDate {
    /// The modified service
    pub service_id: String,
    /// Day of the exception
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    /// Added or removed that day
    pub exception_type: Exception,
}

/// A row of `stops.txt`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct RawStop {
    /// `stop_id`, e.g. `LON123A`
    #[serde(rename = "stop_id")]
    pub id: String,
    /// `stop_code`, `None` when blank
    #[serde(rename = "stop_code", default, deserialize_with = "empty_as_none")]
    pub code: Option<String>,
    /// `stop_name`
    #[serde(rename = "stop_name", default)]
    pub name: String,
    /// `stop_lon`
    #[serde(rename = "stop_lon", default, deserialize_with = "optional_float")]
    pub longitude: Option<f64>,
    /// `stop_lat`
    #[serde(rename = "stop_lat", default, deserialize_with = "optional_float")]
    pub latitude: Option<f64>,
    /// `parent_station`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub parent_station: Option<String>,
}

impl fmt::Display for RawStop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "stop {} (code: {}, name: {})",
            self.id,
            self.code.as_deref().unwrap_or("-"),
            self.name
        )
    }
}

/// A row of `stop_times.txt`, reduced to what tells which stops a trip serves
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawStopTime {
    /// `trip_id`
    pub trip_id: String,
    /// `stop_id`
    pub stop_id: String,
    /// `stop_sequence`
    pub stop_sequence: u32,
}

/// A row of `routes.txt`
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RawRoute {
    /// `route_id` as declared by the feed
    #[serde(rename = "route_id")]
    pub id: String,
    /// `agency_id`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub agency_id: Option<String>,
    /// `route_short_name`, e.g. `14` or `T3`
    #[serde(rename = "route_short_name", default)]
    pub short_name: String,
    /// `route_long_name`
    #[serde(rename = "route_long_name", default)]
    pub long_name: String,
    /// `route_desc`
    #[serde(rename = "route_desc", default, deserialize_with = "empty_as_none")]
    pub desc: Option<String>,
    /// `route_type`
    pub route_type: RouteType,
    /// `route_color`, `RRGGBB`, `None` when blank
    #[serde(rename = "route_color", default, deserialize_with = "empty_as_none")]
    pub color: Option<String>,
    /// `route_text_color`
    #[serde(rename = "route_text_color", default, deserialize_with = "empty_as_none")]
    pub text_color: Option<String>,
}

impl fmt::Display for RawRoute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "route {} (short name: {}, long name: {}, color: {})",
            self.id,
            self.short_name,
            self.long_name,
            self.color.as_deref().unwrap_or("-")
        )
    }
}

/// A row of `trips.txt`
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RawTrip {
    /// `trip_id`
    #[serde(rename = "trip_id")]
    pub id: String,
    /// `service_id`
    pub service_id: String,
    /// `route_id`
    pub route_id: String,
    /// `trip_headsign`, `None` when blank
    #[serde(rename = "trip_headsign", default, deserialize_with = "empty_as_none")]
    pub headsign: Option<String>,
    /// `direction_id`
    #[serde(default)]
    pub direction_id: Option<DirectionType>,
    /// `block_id`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub block_id: Option<String>,
}

impl fmt::Display for RawTrip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "trip {} (route: {}, service: {}, headsign: {}, direction: {})",
            self.id,
            self.route_id,
            self.service_id,
            self.headsign.as_deref().unwrap_or("-"),
            self.direction_id.unwrap_or_default()
        )
    }
}
