//! Catalog column names and typed column extraction.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

pub const TYPE: &str = "type";
pub const DIRECTOR: &str = "director";
pub const CAST: &str = "cast";
pub const COUNTRY: &str = "country";
pub const DATE_ADDED: &str = "date_added";
pub const RELEASE_YEAR: &str = "release_year";
pub const RATING: &str = "rating";
pub const DURATION: &str = "duration";

// Derived by the cleaner
pub const YEAR_ADDED: &str = "year_added";
pub const DURATION_NUM: &str = "duration_num";
pub const IS_TV_SHOW: &str = "is_tv_show";

/// Columns the input file must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    TYPE,
    DATE_ADDED,
    RATING,
    DIRECTOR,
    CAST,
    COUNTRY,
    DURATION,
    RELEASE_YEAR,
];

pub const MOVIE: &str = "Movie";
pub const TV_SHOW: &str = "TV Show";

/// Placeholder for missing director / cast / country.
pub const UNKNOWN: &str = "Unknown";

/// Read a column as optional strings, casting if needed.
pub fn str_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Read a column as optional f64 values.
pub fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Read a column as optional i32 values. Date columns yield days since epoch.
pub fn i32_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i32>>> {
    let column = df.column(name)?.cast(&DataType::Int32)?;
    Ok(column.i32()?.into_iter().collect())
}

/// Days from 0001-01-01 (CE) to 1970-01-01, the Polars `Date` epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Encode a calendar date as a Polars `Date` physical value.
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Decode a Polars `Date` physical value.
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + EPOCH_DAYS_FROM_CE)
}
