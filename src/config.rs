//! Report configuration - input file and chart directory.

use std::path::{Path, PathBuf};

/// Catalog file read when nothing else is configured.
pub const DEFAULT_INPUT_PATH: &str = "data/netflix_titles.csv";
/// Directory receiving the chart images.
pub const DEFAULT_OUTPUT_DIR: &str = "plots";

/// Paths handed to each pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ReportConfig {
    pub fn with_input_path(mut self, path: impl AsRef<Path>) -> Self {
        self.input_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }
}
