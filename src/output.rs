//! JSON files for the downstream builder
use log::info;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::model::GeneratedFeed;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        file_name: path.display().to_string(),
        source,
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(io_error(path))?;
    Ok(())
}

/// Writes one file per record kind and returns their paths
pub fn write_feed(feed: &GeneratedFeed, config: &Configuration) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&config.output_dir).map_err(io_error(&config.output_dir))?;

    let files = [
        config.output_file("agency.json"),
        config.output_file("routes.json"),
        config.output_file("trips.json"),
        config.output_file("stops.json"),
        config.output_file("calendar.json"),
        config.output_file("calendar_dates.json"),
    ];
    write_json(&files[0], &feed.agency)?;
    write_json(&files[1], &feed.routes)?;
    write_json(&files[2], &feed.trips)?;
    write_json(&files[3], &feed.stops)?;
    write_json(&files[4], &feed.calendars)?;
    write_json(&files[5], &feed.calendar_dates)?;

    info!("Wrote {} files to {}", files.len(), config.output_dir.display());
    Ok(files.to_vec())
}
