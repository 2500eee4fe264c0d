//! Loads the dataset, applies a station/year selection and prints every
//! dashboard panel as JSON.
//!
//! ```text
//! air-quality-report [DATASET_PATH] [--station NAME]... [--year YEAR]...
//! ```
//!
//! Set `RUST_LOG=info` for progress output.

use airquality::{Dashboard, DashboardView, FilterSelection, DEFAULT_DATASET_PATH};
use clap::Parser;
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Print air-quality dashboard panels as JSON")]
struct Args {
    /// Air-quality CSV file
    #[arg(default_value = DEFAULT_DATASET_PATH)]
    path: PathBuf,

    /// Station to include (repeatable); every station when omitted
    #[arg(long = "station", value_name = "NAME")]
    stations: Vec<String>,

    /// Year to include (repeatable); every year when omitted
    #[arg(long = "year", value_name = "YEAR")]
    years: Vec<String>,
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let dashboard = Dashboard::load(args.path)?;

    let all = dashboard.default_selection()?;
    let selection = FilterSelection {
        stations: if args.stations.is_empty() {
            all.stations
        } else {
            args.stations.into_iter().collect()
        },
        years: if args.years.is_empty() {
            all.years
        } else {
            args.years.into_iter().collect()
        },
    };

    let view = dashboard.refresh(&selection)?;
    if let DashboardView::NoData { message } = &view {
        eprintln!("{}", message);
    }
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_repeated_flags_and_path() {
        let args = Args::try_parse_from([
            "air-quality-report",
            "data.csv",
            "--station",
            "Dongsi",
            "--year",
            "2014",
            "--station",
            "Gucheng",
        ])
        .unwrap();
        assert_eq!(args.path, PathBuf::from("data.csv"));
        assert_eq!(args.stations, vec!["Dongsi", "Gucheng"]);
        assert_eq!(args.years, vec!["2014"]);
    }

    #[test]
    fn test_defaults_select_everything_from_default_path() {
        let args = Args::try_parse_from(["air-quality-report"]).unwrap();
        assert_eq!(args.path, PathBuf::from(DEFAULT_DATASET_PATH));
        assert!(args.stations.is_empty());
        assert!(args.years.is_empty());
    }

    #[test]
    fn test_bad_input_is_rejected() {
        assert!(Args::try_parse_from(["air-quality-report", "--station"]).is_err());
        assert!(Args::try_parse_from(["air-quality-report", "--verbose"]).is_err());
        assert!(Args::try_parse_from(["air-quality-report", "a.csv", "b.csv"]).is_err());
    }
}
