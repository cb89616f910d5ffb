//! Exclusion hooks driven by the useful service ids
use feed_reader::{
    useful_service_ids, RawCalendar, RawCalendarDate, RawFeed, RawRoute, RawTrip, ServiceWindow,
};
use rustc_hash::FxHashSet;

/// `None` keeps every service
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    service_ids: Option<FxHashSet<String>>,
}

impl ServiceFilter {
    pub fn new(service_ids: Option<FxHashSet<String>>) -> Self {
        Self { service_ids }
    }

    pub fn from_feed(feed: &RawFeed, window: Option<ServiceWindow>) -> Self {
        Self::new(useful_service_ids(feed, window))
    }

    /// Nothing runs in the window, the whole run can be skipped
    pub fn excluding_all(&self) -> bool {
        matches!(&self.service_ids, Some(ids) if ids.is_empty())
    }

    fn excludes_service(&self, service_id: &str) -> bool {
        match &self.service_ids {
            Some(ids) => !ids.contains(service_id),
            None => false,
        }
    }

    pub fn exclude_calendar(&self, calendar: &RawCalendar) -> bool {
        self.excludes_service(&calendar.id)
    }

    pub fn exclude_calendar_date(&self, calendar_date: &RawCalendarDate) -> bool {
        self.excludes_service(&calendar_date.service_id)
    }

    pub fn exclude_trip(&self, trip: &RawTrip) -> bool {
        self.excludes_service(&trip.service_id)
    }

    /// Routes are never excluded, a route without kept trips simply produces nothing
    pub fn exclude_route(&self, _route: &RawRoute) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(service_id: &str) -> RawTrip {
        RawTrip {
            id: format!("trip_{service_id}"),
            service_id: service_id.to_owned(),
            route_id: "CITCRC_14".to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn no_allow_list_keeps_everything() {
        let filter = ServiceFilter::new(None);
        assert!(!filter.excluding_all());
        assert!(!filter.exclude_trip(&trip("ANY")));
        assert!(!filter.exclude_route(&RawRoute::default()));
    }

    #[test]
    fn allow_list() {
        let filter = ServiceFilter::new(Some(["WEEK".to_owned()].into_iter().collect()));
        assert!(!filter.excluding_all());
        assert!(!filter.exclude_trip(&trip("WEEK")));
        assert!(filter.exclude_trip(&trip("OLD")));
        assert!(!filter.exclude_route(&RawRoute::default()));
    }

    #[test]
    fn empty_allow_list_excludes_all() {
        let filter = ServiceFilter::new(Some(FxHashSet::default()));
        assert!(filter.excluding_all());
        assert!(filter.exclude_trip(&trip("WEEK")));
    }
}
