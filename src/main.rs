use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde_json::json;

use ev_dashboard::chart::{dashboard_charts, zip_summary};
use ev_dashboard::config::DashboardConfig;
use ev_dashboard::data::loader::load_file;
use ev_dashboard::state::DashboardState;

/// Summarise an electric vehicle registration table as dashboard views
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Registration table (.csv, .json or .parquet)
    data: PathBuf,

    /// Postal code to filter the registration list by
    #[arg(short, long, default_value = "")]
    zip: String,

    /// JSON file overriding column names, bins, limits and colours
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print renderer-ready chart series instead of the raw views
    #[arg(long)]
    charts: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    let mut state = DashboardState::new(config);
    state.select_zip(cli.zip.as_str());
    match load_file(&cli.data) {
        Ok(dataset) => state.set_dataset(dataset),
        Err(err) => {
            warn!("showing empty views: {err:#}");
            state.set_load_failed(format!("{err:#}"));
        }
    }
    info!(
        "{} rows, {} distinct postal codes",
        state.snapshot.row_count,
        state.snapshot.zip_codes.len()
    );

    let output = if cli.charts {
        let limit = state.config.zip_summary_limit;
        json!({
            "charts": dashboard_charts(&state.config, &state.snapshot),
            "selected_zip": state.snapshot.selected_zip,
            "zip_match_count": state.snapshot.zip_matches.len(),
            "zip_summary": zip_summary(&state.config, &state.snapshot, limit),
            "status": state.status_message,
        })
    } else {
        serde_json::to_value(&state.snapshot).context("serialising views")?
    };

    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("serialising output")?;
    println!("{text}");
    Ok(())
}
