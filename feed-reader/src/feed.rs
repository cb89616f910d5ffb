use crate::objects::*;
use crate::Error;
use crate::FeedReader;
use log::info;
use std::path::Path;

/// The raw collections of a feed, as read from the CSV files
///
/// Optional files that are absent are read as empty collections.
#[derive(Debug, Default)]
pub struct RawFeed {
    /// Time needed to read and parse the feed in milliseconds
    pub read_duration: i64,
    /// All Calendar rows
    pub calendar: Vec<RawCalendar>,
    /// All Calendar dates rows
    pub calendar_dates: Vec<RawCalendarDate>,
    /// All Stops
    pub stops: Vec<RawStop>,
    /// All Routes
    pub routes: Vec<RawRoute>,
    /// All Trips
    pub trips: Vec<RawTrip>,
    /// All StopTimes, empty if absent or not read
    pub stop_times: Vec<RawStopTime>,
    /// All files that are present in the feed
    pub files: Vec<String>,
    /// sha256 sum of the feed, only computed for archives
    pub sha256: Option<String>,
}

impl RawFeed {
    /// Reads the feed from a local zip archive or local directory with the default [FeedReader]
    pub fn from_path<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        FeedReader::default().read_from_path(path)
    }

    /// Logs how many rows each file held
    pub fn log_stats(&self) {
        info!(
            "feed read in {} ms: {} routes, {} stops, {} trips, {} stop times, {} calendars, {} calendar dates",
            self.read_duration,
            self.routes.len(),
            self.stops.len(),
            self.trips.len(),
            self.stop_times.len(),
            self.calendar.len(),
            self.calendar_dates.len(),
        );
        if let Some(sha256) = &self.sha256 {
            info!("feed sha256: {}", sha256);
        }
    }
}
