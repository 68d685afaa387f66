//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - reads `.env` and parses CLI arguments
//! - sets up tracing
//! - loads and joins the two input tables (once, before anything is served)
//! - serves the dashboard, prints the inspection report, or writes exports

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::chart::build_chart;
use crate::cli::{Cli, Command, DataArgs, ExportArgs, ServeArgs, rewrite_args};
use crate::data::Dataset;
use crate::domain::DEFAULT_BIND;
use crate::error::AppError;

/// Entry point for the `fomc-dash` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Export(args) => handle_export(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    let config = args.data.to_config(&args.bind);
    let dataset = Arc::new(Dataset::load(&config)?);

    // One thread serves every request; handlers only read the dataset.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::io(format!("Failed to start runtime: {e}")))?;

    runtime.block_on(crate::server::serve(dataset, &config.bind))
}

fn handle_inspect(args: DataArgs) -> Result<(), AppError> {
    let dataset = Dataset::load(&args.to_config(DEFAULT_BIND))?;

    println!("{}", crate::report::format_load_summary(&dataset));
    println!("{}", crate::report::format_event_table(&dataset.events));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    if args.json.is_none() && args.svg.is_none() {
        return Err(AppError::new(2, "Nothing to export: pass --json <PATH> and/or --svg <PATH>."));
    }

    let dataset = Dataset::load(&args.data.to_config(DEFAULT_BIND))?;
    let spec = build_chart(&dataset.series, &dataset.events);

    if let Some(path) = &args.json {
        crate::io::export::write_figure_json(path, &spec)?;
        info!(path = %path.display(), "figure JSON written");
    }
    if let Some(path) = &args.svg {
        crate::io::export::write_chart_svg(path, &spec, args.width, args.height)?;
        info!(path = %path.display(), "chart SVG written");
    }

    Ok(())
}
