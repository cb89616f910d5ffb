use chrono::Utc;
use log::debug;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::error::LineError;
use crate::{Error, RawFeed};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

const FEED_FILES: [&str; 6] = [
    "calendar.txt",
    "calendar_dates.txt",
    "routes.txt",
    "stops.txt",
    "stop_times.txt",
    "trips.txt",
];

/// Options of the feed reading
///
/// ```no_run
/// let feed = feed_reader::FeedReader::default()
///     .read_stop_times(false)
///     .read_from_path("input/gtfs.zip")?;
/// assert!(feed.stop_times.is_empty());
/// # Ok::<(), feed_reader::Error>(())
/// ```
#[derive(Derivative)]
#[derivative(Default)]
pub struct FeedReader {
    /// Read `stop_times.txt`, only needed to know which stops are served (default: true)
    #[derivative(Default(value = "true"))]
    pub read_stop_times: bool,
    /// Trim every cell (default: true)
    #[derivative(Default(value = "true"))]
    pub trim_fields: bool,
}

/// Where the CSV files of a feed come from
trait FeedSource {
    fn files(&self) -> Vec<String>;

    /// `None` when the file is not in the feed
    fn open(&mut self, file_name: &str) -> Option<Result<Box<dyn Read + '_>, Error>>;
}

struct Directory(PathBuf);

impl FeedSource for Directory {
    fn files(&self) -> Vec<String> {
        std::fs::read_dir(&self.0)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn open(&mut self, file_name: &str) -> Option<Result<Box<dyn Read + '_>, Error>> {
        let path = self.0.join(file_name);
        if !path.is_file() {
            return None;
        }
        Some(
            File::open(path)
                .map(|file| Box::new(file) as Box<dyn Read>)
                .map_err(|source| Error::File {
                    file_name: file_name.to_owned(),
                    source,
                }),
        )
    }
}

struct Archive<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    /// feed file name to entry index, the files may be nested in a folder
    entries: FxHashMap<&'static str, usize>,
}

impl<R: Read + Seek> Archive<R> {
    fn new(reader: R) -> Result<Self, Error> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let mut entries = FxHashMap::default();
        for index in 0..archive.len() {
            let entry = archive.by_index(index)?;
            let base_name = Path::new(entry.name())
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            if let Some(feed_file) = FEED_FILES.iter().find(|f| **f == base_name) {
                entries.insert(*feed_file, index);
            }
        }
        Ok(Self { archive, entries })
    }
}

impl<R: Read + Seek> FeedSource for Archive<R> {
    fn files(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_owned).collect()
    }

    fn open(&mut self, file_name: &str) -> Option<Result<Box<dyn Read + '_>, Error>> {
        let index = *self.entries.get(file_name)?;
        Some(
            self.archive
                .by_index(index)
                .map(|entry| Box::new(entry) as Box<dyn Read>)
                .map_err(Error::from),
        )
    }
}

impl FeedReader {
    /// Returns Self and can be chained
    pub fn read_stop_times(mut self, read_stop_times: bool) -> Self {
        self.read_stop_times = read_stop_times;
        self
    }

    /// Returns Self and can be chained
    pub fn trim_fields(mut self, trim_fields: bool) -> Self {
        self.trim_fields = trim_fields;
        self
    }

    /// Reads a zip archive or a directory
    pub fn read_from_path<P>(&self, path: P) -> Result<RawFeed, Error>
    where
        P: AsRef<Path>,
    {
        let p = path.as_ref();
        if p.is_file() {
            self.read_from_reader(File::open(p)?)
        } else if p.is_dir() {
            self.read_feed(Directory(p.to_path_buf()), None)
        } else {
            Err(Error::NotFileNorDirectory(p.display().to_string()))
        }
    }

    /// Reads a zip archive from memory or any seekable reader
    pub fn read_from_reader<T: Read + Seek>(&self, reader: T) -> Result<RawFeed, Error> {
        let mut reader = BufReader::new(reader);
        let mut hasher = Sha256::new();
        std::io::copy(&mut reader, &mut hasher)?;
        let sha256 = format!("{:x}", hasher.finalize());
        reader.rewind()?;
        self.read_feed(Archive::new(reader)?, Some(sha256))
    }

    fn read_feed<S: FeedSource>(&self, mut source: S, sha256: Option<String>) -> Result<RawFeed, Error> {
        let start = Utc::now();
        let mut feed = RawFeed {
            routes: self.mandatory(&mut source, "routes.txt")?,
            stops: self.mandatory(&mut source, "stops.txt")?,
            trips: self.mandatory(&mut source, "trips.txt")?,
            calendar: self.optional(&mut source, "calendar.txt")?,
            calendar_dates: self.optional(&mut source, "calendar_dates.txt")?,
            stop_times: if self.read_stop_times {
                self.optional(&mut source, "stop_times.txt")?
            } else {
                Vec::new()
            },
            files: source.files(),
            sha256,
            ..Default::default()
        };
        feed.read_duration = Utc::now().signed_duration_since(start).num_milliseconds();
        Ok(feed)
    }

    fn mandatory<S: FeedSource, O: DeserializeOwned>(
        &self,
        source: &mut S,
        file_name: &str,
    ) -> Result<Vec<O>, Error> {
        let reader = source
            .open(file_name)
            .ok_or_else(|| Error::MissingFile(file_name.to_owned()))??;
        self.parse(reader, file_name)
    }

    /// An absent optional file is an empty collection
    fn optional<S: FeedSource, O: DeserializeOwned>(
        &self,
        source: &mut S,
        file_name: &str,
    ) -> Result<Vec<O>, Error> {
        match source.open(file_name) {
            Some(reader) => self.parse(reader?, file_name),
            None => {
                debug!("no {} in the feed", file_name);
                Ok(Vec::new())
            }
        }
    }

    fn parse<O: DeserializeOwned>(&self, reader: impl Read, file_name: &str) -> Result<Vec<O>, Error> {
        let file_error = |source| Error::File {
            file_name: file_name.to_owned(),
            source,
        };
        let mut reader = BufReader::new(reader);
        if reader.fill_buf().map_err(file_error)?.starts_with(UTF8_BOM) {
            reader.consume(UTF8_BOM.len());
        }

        let csv_error = |source, line| Error::Csv {
            file_name: file_name.to_owned(),
            source,
            line,
        };
        let mut csv = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(if self.trim_fields {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);
        let headers = csv.headers().map_err(|e| csv_error(e, None))?.clone();

        let objs = csv
            .records()
            .map(|record| {
                let record = record.map_err(|e| csv_error(e, None))?;
                record
                    .deserialize(Some(&headers))
                    .map_err(|e| csv_error(e, Some(LineError::new(&headers, &record))))
            })
            .collect::<Result<Vec<O>, Error>>()?;
        debug!("{} rows in {}", objs.len(), file_name);
        Ok(objs)
    }
}
