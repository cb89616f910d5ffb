use feed_reader::ServiceWindow;
use std::path::PathBuf;

pub struct Configuration {
    /// GTFS directory or zip archive
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Prepended to every output file name
    pub file_prefix: String,
    /// `None` keeps every service
    pub window: Option<ServiceWindow>,
    pub good_enough_accepted: bool,
}

impl Configuration {
    pub fn output_file(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}", self.file_prefix, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_names() {
        let config = Configuration {
            input: PathBuf::from("gtfs.zip"),
            output_dir: PathBuf::from("out"),
            file_prefix: "ca_citcrc_".to_owned(),
            window: None,
            good_enough_accepted: true,
        };
        assert_eq!(
            PathBuf::from("out/ca_citcrc_routes.json"),
            config.output_file("routes.json")
        );
    }
}
