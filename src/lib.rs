//! Customization layer turning the CITCRC (Chambly, Richelieu, Carignan) bus GTFS feed into
//! canonical routes, trips and stops.
//!
//! [AgencyTools::citcrc] bundles the rule tables, [generate] applies them to a [RawFeed] and
//! [output::write_feed] writes the result.
pub mod agency;
pub mod config;
pub mod error;
pub mod exclusions;
pub mod generator;
pub mod headsigns;
pub mod labels;
pub mod model;
pub mod output;
pub mod patterns;
pub mod routes;
pub mod splitting;
pub mod stops;

pub use agency::AgencyTools;
pub use config::Configuration;
pub use error::{Error, Result, RouteIdFailure, StopIdFailure};
pub use exclusions::ServiceFilter;
pub use feed_reader::{FeedReader, RawFeed, ServiceWindow};
pub use generator::generate;
pub use model::{AgencyInfo, CanonicalRoute, CanonicalStop, CanonicalTrip, GeneratedFeed};
