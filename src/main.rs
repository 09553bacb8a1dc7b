//! Startup Funding - Indian startup funding & software salary analysis
//!
//! Loads the 2019-2021 funding extracts and the salary survey, prints the
//! funding and investor figures with a city-level comparison, then plots
//! average salary against total funding per city.

mod charts;
mod config;
mod data;
mod gui;
mod report;
mod stats;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::Cli;
use data::DataLoader;
use report::AnalysisReport;
use tracing::info;
use tracing_subscriber::EnvFilter;

const PNG_SIZE: (u32, u32) = (1200, 800);

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let loader = DataLoader::new(&cli.data_dir);
    let report = AnalysisReport::generate(&loader, &cli.analysis_options())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }

    let points = charts::city_points(&report.cities);

    if let Some(path) = &cli.save_chart {
        let (width, height) = PNG_SIZE;
        charts::StaticChartRenderer::render_png(path, &points, width, height)
            .with_context(|| format!("saving chart to {}", path.display()))?;
    }

    if cli.no_plot {
        info!("Chart window skipped");
        return Ok(());
    }

    gui::show_city_scatter(points).map_err(|e| anyhow!("chart window failed: {e}"))
}
