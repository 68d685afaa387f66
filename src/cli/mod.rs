//! Command-line parsing for the dashboard.
//!
//! Every option has a default (and an environment fallback), so a bare
//! `fomc-dash` starts the server on the standard input files.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::chart::svg::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::domain::{DEFAULT_BIND, DEFAULT_CUTOFF, DEFAULT_MEETINGS_CSV, DEFAULT_RATES_CSV, DashboardConfig};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fomc-dash", version, about = "Fed Funds Target Rate vs FOMC announcements dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the data and serve the interactive chart (default).
    Serve(ServeArgs),
    /// Print the load summary and the joined meeting table.
    Inspect(DataArgs),
    /// Write the chart as Plotly figure JSON and/or SVG.
    Export(ExportArgs),
}

/// Input files and the date filter.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Rate history CSV (`date` plus one value column).
    #[arg(long, env = "FOMC_RATES_CSV", default_value = DEFAULT_RATES_CSV)]
    pub rates: PathBuf,

    /// Meeting summary CSV (`date`, `policy sentiment`, `rate`, `summary (50 words)`).
    #[arg(long, env = "FOMC_MEETINGS_CSV", default_value = DEFAULT_MEETINGS_CSV)]
    pub meetings: PathBuf,

    /// Drop rate observations dated before this day (YYYY-MM-DD).
    #[arg(long, env = "FOMC_CUTOFF", default_value = DEFAULT_CUTOFF)]
    pub cutoff: NaiveDate,
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Address to listen on.
    #[arg(long, env = "FOMC_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Write the Plotly figure JSON here.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Write the SVG rendering here.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// SVG width (pixels).
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// SVG height (pixels).
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,
}

impl DataArgs {
    pub fn to_config(&self, bind: &str) -> DashboardConfig {
        DashboardConfig {
            rates_csv: self.rates.clone(),
            meetings_csv: self.meetings.clone(),
            cutoff: self.cutoff,
            bind: bind.to_string(),
        }
    }
}

/// Rewrite argv so `fomc-dash` defaults to `fomc-dash serve`.
///
/// Rules:
/// - `fomc-dash`                      -> `fomc-dash serve`
/// - `fomc-dash --bind 0.0.0.0:8050`  -> `fomc-dash serve --bind 0.0.0.0:8050`
/// - `fomc-dash --help/--version/-h`  -> unchanged
pub fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_serves() {
        assert_eq!(rewrite_args(argv(&["fomc-dash"])), argv(&["fomc-dash", "serve"]));
        assert_eq!(
            rewrite_args(argv(&["fomc-dash", "--bind", "0.0.0.0:9000"])),
            argv(&["fomc-dash", "serve", "--bind", "0.0.0.0:9000"])
        );
        assert_eq!(rewrite_args(argv(&["fomc-dash", "--help"])), argv(&["fomc-dash", "--help"]));
        assert_eq!(rewrite_args(argv(&["fomc-dash", "inspect"])), argv(&["fomc-dash", "inspect"]));
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["fomc-dash", "serve"]).unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        // Environment overrides are not expected in the test environment.
        if std::env::var_os("FOMC_RATES_CSV").is_none() {
            assert_eq!(args.data.rates, PathBuf::from("fed.csv"));
        }
        if std::env::var_os("FOMC_CUTOFF").is_none() {
            assert_eq!(args.data.cutoff, NaiveDate::from_ymd_opt(2017, 2, 1).unwrap());
        }
        if std::env::var_os("FOMC_BIND").is_none() {
            assert_eq!(args.bind, "127.0.0.1:8050");
        }
    }

    #[test]
    fn export_parses_outputs() {
        let cli = Cli::try_parse_from([
            "fomc-dash", "export", "--json", "out.json", "--svg", "out.svg", "--cutoff", "2020-01-01",
        ])
        .unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.json, Some(PathBuf::from("out.json")));
        assert_eq!(args.svg, Some(PathBuf::from("out.svg")));
        assert_eq!(args.data.cutoff, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(args.width, 1200);
    }

    #[test]
    fn invalid_cutoff_is_rejected() {
        assert!(Cli::try_parse_from(["fomc-dash", "inspect", "--cutoff", "Feb 2017"]).is_err());
    }
}
