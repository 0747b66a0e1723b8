//! Catalog Report - CSV cleaning, descriptive analysis & static charts
//!
//! Reads the catalog, prints the ten answers and writes six chart images.

use anyhow::Result;
use catalog_report::ReportConfig;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = ReportConfig::default();
    catalog_report::run(&config)?;
    Ok(())
}
