//! Stats module - frequency counts, descriptive statistics and the catalog analysis

mod analyzer;
pub mod descriptive;
pub mod frequency;

pub use analyzer::{AnalysisReport, AnalyzerError, CatalogAnalyzer};
