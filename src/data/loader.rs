//! CSV Data Loader Module
//! Reads the catalog file into a Polars DataFrame and checks its columns.

use crate::data::schema::REQUIRED_COLUMNS;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Rows scanned to infer column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and verify the catalog columns are present.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()?
            .collect()?;

        Self::check_required_columns(&df)?;

        println!("Loaded shape: {} rows, {} columns", df.height(), df.width());
        info!(rows = df.height(), columns = df.width(), "Loaded catalog");
        Ok(df)
    }

    /// Fail on the first required column the frame lacks.
    pub fn check_required_columns(df: &DataFrame) -> Result<(), LoaderError> {
        match REQUIRED_COLUMNS
            .iter()
            .find(|name| df.column(name).is_err())
        {
            Some(name) => Err(LoaderError::MissingColumn(name.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str =
        "show_id,type,title,director,cast,country,date_added,release_year,rating,duration";

    fn write_csv(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("titles.csv");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_rows_and_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &format!(
                "{HEADER}\n\
                 s1,Movie,Alpha,Jane Doe,A B,United States,\"September 25, 2021\",2020,PG-13,90 min\n\
                 s2,TV Show,Beta,,,India,\"January 1, 2020\",2019,TV-MA,2 Seasons\n"
            ),
        );

        let df = DataLoader::load_csv(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 10);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = DataLoader::load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn missing_required_column_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "type,title,director,cast,country,date_added,release_year,duration\n\
             Movie,Alpha,X,Y,Z,\"May 1, 2020\",2020,90 min\n",
        );

        match DataLoader::load_csv(&path) {
            Err(LoaderError::MissingColumn(name)) => assert_eq!(name, "rating"),
            other => panic!("expected missing column, got {:?}", other.map(|df| df.shape())),
        }
    }
}
