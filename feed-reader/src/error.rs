//! Errors raised while reading a feed
use std::fmt;
use thiserror::Error;

/// The CSV line that could not be read, with the headers of its file
#[derive(Debug)]
pub struct LineError {
    /// Headers of the file
    pub headers: Vec<String>,
    /// Cells of the faulty line
    pub values: Vec<String>,
}

impl LineError {
    pub(crate) fn new(headers: &csv::StringRecord, record: &csv::StringRecord) -> Self {
        Self {
            headers: headers.iter().map(str::to_owned).collect(),
            values: record.iter().map(str::to_owned).collect(),
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cells: Vec<String> = self
            .headers
            .iter()
            .zip(self.values.iter())
            .map(|(header, value)| format!("{header}={value}"))
            .collect();
        write!(f, "{}", cells.join(", "))
    }
}

fn describe_line(line: &Option<LineError>) -> String {
    line.as_ref()
        .map(|line| format!(" at line [{line}]"))
        .unwrap_or_default()
}

/// Everything that can go wrong while reading a feed
#[derive(Error, Debug)]
pub enum Error {
    /// `routes.txt`, `stops.txt` or `trips.txt` is absent
    #[error("the feed has no {0}")]
    MissingFile(String),
    /// The feed path does not exist
    #[error("{0} is neither a zip archive nor a directory")]
    NotFileNorDirectory(String),
    /// Listing a directory or reading an archive failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// One file of the feed could not be opened or read
    #[error("impossible to read '{file_name}'")]
    File {
        /// Name of the file inside the feed
        file_name: String,
        /// Cause
        #[source]
        source: std::io::Error,
    },
    /// One file of the feed is not valid CSV, or a line does not match its object
    #[error("impossible to parse '{file_name}'{}", describe_line(.line))]
    Csv {
        /// Name of the file inside the feed
        file_name: String,
        /// Cause
        #[source]
        source: csv::Error,
        /// The faulty line, when the headers could be read
        line: Option<LineError>,
    },
    /// The archive itself or one of its entries is not readable
    #[error("invalid zip archive")]
    Zip(#[from] zip::result::ZipError),
}
