use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::time::Instant;

use citcrc_bus::output::write_feed;
use citcrc_bus::{generate, AgencyTools, Configuration, FeedReader, ServiceFilter, ServiceWindow};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generates the CITCRC bus data from its GTFS feed")]
struct Cli {
    /// GTFS directory or zip archive
    #[arg(value_name = "GTFS")]
    input: PathBuf,

    /// Directory receiving the generated files
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Prepended to every generated file name
    #[arg(short = 'p', long, default_value = "ca_chambly_richelieu_carignan_citcrc_bus_")]
    file_prefix: String,

    /// First day of the period to keep services for (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Number of days in the period
    #[arg(long, default_value_t = 28)]
    days: u32,

    /// Keep every service whatever its dates
    #[arg(long, action = clap::ArgAction::SetTrue)]
    all_services: bool,

    /// Only exact headsigns, no approximate overrides
    #[arg(long, action = clap::ArgAction::SetTrue)]
    strict: bool,
}

impl Cli {
    fn configuration(self) -> Configuration {
        let window = if self.all_services {
            None
        } else {
            let start = self.date.unwrap_or_else(|| Local::now().date_naive());
            Some(ServiceWindow::new(start, self.days))
        };
        Configuration {
            input: self.input,
            output_dir: self.output_dir,
            file_prefix: self.file_prefix,
            window,
            good_enough_accepted: !self.strict,
        }
    }
}

fn run(config: &Configuration) -> anyhow::Result<()> {
    let feed = FeedReader::default()
        .read_from_path(&config.input)
        .with_context(|| format!("impossible to read GTFS from {}", config.input.display()))?;
    feed.log_stats();

    let filter = ServiceFilter::from_feed(&feed, config.window);
    let tools = AgencyTools::citcrc().good_enough_accepted(config.good_enough_accepted);
    let generated = generate(&feed, &tools, &filter).context("impossible to generate CITCRC bus data")?;
    if generated.is_empty() {
        info!("Nothing generated, no file written");
        return Ok(());
    }
    write_feed(&generated, config).context("impossible to write generated data")?;
    Ok(())
}

fn main() {
    env_logger::init();

    let config = Cli::parse().configuration();
    let time = Instant::now();
    info!("Generating CITCRC bus data...");
    if let Err(e) = run(&config) {
        error!("{:?}", e);
        std::process::exit(1);
    }
    info!(
        "Generating CITCRC bus data... DONE in {:.3}s.",
        time.elapsed().as_secs_f32()
    );
}
