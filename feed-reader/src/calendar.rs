//! Service calendar and extraction of the services worth generating data for
use chrono::{Duration, NaiveDate};
use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Exception, RawCalendar, RawCalendarDate, RawFeed};

/// The days a run is interested in: `days` consecutive days starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    /// First day of the window
    pub start: NaiveDate,
    /// Number of days in the window, at least one day is always considered
    pub days: u32,
}

impl ServiceWindow {
    /// Builds a window of `days` days starting at `start`
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self { start, days }
    }

    /// Iterates over every day of the window
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days.max(1)).map(move |offset| self.start + Duration::days(i64::from(offset)))
    }
}

#[derive(Debug, Default)]
struct CalendarExceptionList(FxHashMap<NaiveDate, Exception>);

impl CalendarExceptionList {
    fn on_date(&self, date: NaiveDate) -> Option<Exception> {
        self.0.get(&date).copied()
    }
}

/// `calendar.txt` and `calendar_dates.txt` indexed by service id
#[derive(Debug, Default)]
pub struct ServiceCalendar {
    services: FxHashMap<String, RawCalendar>,
    exceptions: FxHashMap<String, CalendarExceptionList>,
}

impl ServiceCalendar {
    /// Indexes the calendar rows and their exceptions
    pub fn parse(calendar: &[RawCalendar], exceptions_list: &[RawCalendarDate]) -> Self {
        let services = calendar
            .iter()
            .map(|service| (service.id.clone(), service.clone()))
            .collect();

        let mut exceptions: FxHashMap<String, CalendarExceptionList> = FxHashMap::default();
        for exc in exceptions_list {
            exceptions
                .entry(exc.service_id.clone())
                .or_default()
                .0
                .insert(exc.date, exc.exception_type);
        }
        Self {
            services,
            exceptions,
        }
    }

    /// Every service id known by either file
    pub fn service_ids(&self) -> impl Iterator<Item = &str> {
        self.services
            .keys()
            .chain(self.exceptions.keys())
            .map(String::as_str)
    }

    /// An exception on that date wins over the weekly pattern
    pub fn runs_on_date(&self, service_id: &str, date: NaiveDate) -> bool {
        let exception = self
            .exceptions
            .get(service_id)
            .and_then(|a| a.on_date(date));

        match exception {
            Some(Exception::Added) => true,
            Some(Exception::Deleted) => false,
            None => self
                .services
                .get(service_id)
                .map(|a| a.runs_on_date(date))
                .unwrap_or(false),
        }
    }

    /// Does the service run on at least one day of the window
    pub fn runs_within(&self, service_id: &str, window: &ServiceWindow) -> bool {
        window.dates().any(|date| self.runs_on_date(service_id, date))
    }
}

/// Extracts the allow-list of services running inside `window`
///
/// Returns `None` when no window is given, meaning "no filtering". A returned empty set
/// means nothing runs in the window and the whole run should be skipped.
pub fn useful_service_ids(
    feed: &RawFeed,
    window: Option<ServiceWindow>,
) -> Option<FxHashSet<String>> {
    let window = window?;
    let calendar = ServiceCalendar::parse(&feed.calendar, &feed.calendar_dates);

    let useful: FxHashSet<String> = calendar
        .service_ids()
        .filter(|service_id| calendar.runs_within(service_id, &window))
        .map(str::to_owned)
        .collect();

    for service_id in calendar.service_ids() {
        if !useful.contains(service_id) {
            debug!("service {} does not run from {} for {} days", service_id, window.start, window.days);
        }
    }
    info!(
        "{} useful service ids from {} for {} days",
        useful.len(),
        window.start,
        window.days
    );
    Some(useful)
}
