//! Report driver - runs load, clean, analyze and render in one pass.

use crate::charts::ChartRenderer;
use crate::config::ReportConfig;
use crate::data::{DataCleaner, DataLoader};
use crate::stats::{AnalysisReport, CatalogAnalyzer};
use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub loaded_rows: usize,
    pub cleaned_rows: usize,
    pub analysis: AnalysisReport,
    pub charts: Vec<PathBuf>,
}

/// Load the catalog and return the cleaned table with the loaded row count.
pub fn load_and_clean(input_path: &Path) -> Result<(DataFrame, usize)> {
    info!(input = %input_path.display(), "Loading catalog");
    let raw = DataLoader::load_csv(input_path)
        .with_context(|| format!("Failed to load catalog from {}", input_path.display()))?;
    let loaded_rows = raw.height();

    println!("\n=== Preprocessing ===");
    let df = DataCleaner::clean(raw).context("Failed to clean catalog")?;
    Ok((df, loaded_rows))
}

/// Run the whole report.
pub fn run(config: &ReportConfig) -> Result<RunSummary> {
    let (df, loaded_rows) = load_and_clean(&config.input_path)?;

    println!("\n=== Analytical queries ===");
    let analysis = CatalogAnalyzer::analyze(&df).context("Failed to analyze catalog")?;
    println!("{analysis}");

    println!("=== Generating charts ===");
    let charts = ChartRenderer::render_all(&df, &config.output_dir).with_context(|| {
        format!("Failed to render charts into {}", config.output_dir.display())
    })?;
    info!(
        count = charts.len(),
        dir = %config.output_dir.display(),
        "Report complete"
    );
    println!("All charts saved to '{}'", config.output_dir.display());

    Ok(RunSummary {
        loaded_rows,
        cleaned_rows: df.height(),
        analysis,
        charts,
    })
}
