//! Catalog Report - CSV cleaning, descriptive analysis & static charts
//!
//! A single-pass batch report over a movie / TV-show catalog.

pub mod charts;
pub mod config;
pub mod data;
pub mod report;
pub mod stats;

pub use config::ReportConfig;
pub use report::{run, RunSummary};
