//! Data Cleaner Module
//! Drops unusable rows, fills text sentinels and derives the computed columns.

use crate::data::schema::{
    date_to_days, days_to_date, i32_values, str_values, CAST, COUNTRY, DATE_ADDED, DIRECTOR,
    DURATION, DURATION_NUM, IS_TV_SHOW, RATING, TV_SHOW, TYPE, UNKNOWN, YEAR_ADDED,
};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Layouts accepted for `date_added`, tried in order.
const DATE_FORMATS: [&str; 5] = ["%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d-%b-%y", "%d-%b-%Y"];

/// Null count per column, in column order.
pub type MissingCounts = Vec<(String, usize)>;

/// Turns a freshly loaded catalog into the cleaned, read-only table.
pub struct DataCleaner;

impl DataCleaner {
    /// Run every cleaning step in order and report missing values around it.
    pub fn clean(df: DataFrame) -> Result<DataFrame, CleanerError> {
        let before = Self::missing_counts(&df);
        println!("Missing values before cleaning:");
        for (name, count) in &before {
            println!("  {:<14} {}", name, count);
        }

        let loaded_rows = df.height();
        let df = Self::drop_incomplete_and_fill(df)?;
        debug!(dropped = loaded_rows - df.height(), "Dropped rows without date_added/rating");

        let deduped_from = df.height();
        let df = Self::drop_duplicates(df)?;
        debug!(dropped = deduped_from - df.height(), "Dropped duplicate rows");

        let parsed_from = df.height();
        let df = Self::parse_dates(df)?;
        debug!(dropped = parsed_from - df.height(), "Dropped rows with unparseable date_added");

        // Rows spelling the same date differently only collide once parsed
        let reparsed_from = df.height();
        let df = Self::drop_duplicates(df)?;
        debug!(dropped = reparsed_from - df.height(), "Dropped duplicates after date parsing");

        let df = Self::derive_columns(df)?;

        let remaining: usize = Self::missing_counts(&df)
            .iter()
            .filter(|(name, _)| name != DURATION_NUM)
            .map(|(_, count)| count)
            .sum();
        println!("Missing values after cleaning: {} remaining", remaining);
        println!("Cleaned shape: {} rows, {} columns", df.height(), df.width());
        info!(
            rows = df.height(),
            columns = df.width(),
            dropped = loaded_rows - df.height(),
            "Cleaned catalog"
        );

        Ok(df)
    }

    /// Null count of every column.
    pub fn missing_counts(df: &DataFrame) -> MissingCounts {
        df.get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect()
    }

    /// Drop rows missing `date_added`/`rating`, then fill the text sentinels.
    fn drop_incomplete_and_fill(df: DataFrame) -> PolarsResult<DataFrame> {
        let fills = [DIRECTOR, CAST, COUNTRY].map(|name| {
            col(name)
                .cast(DataType::String)
                .fill_null(lit(UNKNOWN))
        });

        df.lazy()
            .filter(col(DATE_ADDED).is_not_null().and(col(RATING).is_not_null()))
            .with_columns(fills)
            .collect()
    }

    /// Remove exact duplicate rows, keeping the first in table order.
    fn drop_duplicates(df: DataFrame) -> PolarsResult<DataFrame> {
        df.lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()
    }

    /// Parse `date_added` into a `Date` column and drop rows that fail.
    fn parse_dates(mut df: DataFrame) -> PolarsResult<DataFrame> {
        let days: Vec<Option<i32>> = if df.column(DATE_ADDED)?.dtype() == &DataType::Date {
            i32_values(&df, DATE_ADDED)?
        } else {
            str_values(&df, DATE_ADDED)?
                .iter()
                .map(|raw| raw.as_deref().and_then(parse_date_added).map(date_to_days))
                .collect()
        };

        let dates = Column::new(DATE_ADDED.into(), days).cast(&DataType::Date)?;
        df.with_column(dates)?;

        df.lazy().filter(col(DATE_ADDED).is_not_null()).collect()
    }

    /// Add `year_added`, `duration_num` and `is_tv_show`.
    fn derive_columns(mut df: DataFrame) -> PolarsResult<DataFrame> {
        let year_added: Vec<Option<i32>> = i32_values(&df, DATE_ADDED)?
            .into_iter()
            .map(|days| days.and_then(days_to_date).map(|d| d.year()))
            .collect();

        let duration_num: Vec<Option<f64>> = str_values(&df, DURATION)?
            .iter()
            .map(|raw| raw.as_deref().and_then(parse_duration))
            .collect();

        let is_tv_show: Vec<i32> = str_values(&df, TYPE)?
            .iter()
            .map(|kind| i32::from(kind.as_deref() == Some(TV_SHOW)))
            .collect();

        df.with_column(Column::new(YEAR_ADDED.into(), year_added))?;
        df.with_column(Column::new(DURATION_NUM.into(), duration_num))?;
        df.with_column(Column::new(IS_TV_SHOW.into(), is_tv_show))?;
        Ok(df)
    }
}

/// Parse a trimmed `date_added` value; `None` when no layout matches.
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Minutes for "90 min", season count for "3 Seasons", otherwise `None`.
pub fn parse_duration(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if !text.contains("min") && !text.contains("Season") {
        return None;
    }
    text.split_whitespace()
        .next()?
        .parse::<u32>()
        .ok()
        .map(f64::from)
}
