/*! Minimal reader for the [General Transit Feed Specification](https://gtfs.org/) (GTFS) files an agency customization layer consumes.

This crate brings [serde](https://serde.rs) structures for the handful of GTFS objects
needed to build canonical routes, stops and trips, and helpers to read them from a
directory or a zip archive.

To get started, see [FeedReader] and [RawFeed].

## Design decisions

### Raw objects only

Every object is kept as close as possible to its CSV representation ([RawRoute], [RawStop],
[RawTrip]...). Nothing is renamed, re-identified or cleaned here: that is the job of the
agency customization layer built on top of this crate.

### Optional files

`routes.txt`, `stops.txt` and `trips.txt` are mandatory. `calendar.txt`, `calendar_dates.txt`
and `stop_times.txt` are optional; a missing optional file is an empty collection, not an error.

### Service calendar

[ServiceCalendar] answers "does this service run on that day" and
[useful_service_ids] extracts the allow-list of services running inside a [ServiceWindow].
*/
#![warn(missing_docs)]

#[macro_use]
extern crate derivative;
#[macro_use]
extern crate serde_derive;

pub mod calendar;
mod enums;
pub mod error;
mod feed;
mod objects;
mod reader;
mod serde_helpers;


pub use calendar::{useful_service_ids, ServiceCalendar, ServiceWindow};
pub use enums::*;
pub use error::Error;
pub use feed::RawFeed;
pub use objects::*;
pub use reader::FeedReader;
