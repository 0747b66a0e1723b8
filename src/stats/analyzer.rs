//! Catalog Analyzer Module
//! Answers the ten fixed descriptive questions over the cleaned catalog.

use crate::data::schema::{
    days_to_date, f64_values, i32_values, str_values, COUNTRY, DATE_ADDED, DIRECTOR,
    DURATION_NUM, IS_TV_SHOW, MOVIE, RATING, RELEASE_YEAR, TV_SHOW, TYPE, UNKNOWN, YEAR_ADDED,
};
use crate::stats::descriptive::{mean, paired, pearson, round_to};
use crate::stats::frequency::{
    column_counts, count_by, most_frequent, split_counts, value_counts, Frequencies,
};
use chrono::Datelike;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::debug;

// Reported precision, one constant per statistic
pub const MOVIE_DURATION_DECIMALS: u32 = 1;
pub const TV_SEASONS_DECIMALS: u32 = 2;
pub const YEAR_CORRELATION_DECIMALS: u32 = 3;
pub const TV_SHARE_DECIMALS: u32 = 3;

/// Years covered by the yearly TV-show share.
pub const TV_SHARE_YEARS: RangeInclusive<i32> = 2015..=2021;

pub const TOP_DIRECTORS: usize = 3;

const DECEMBER: u32 = 12;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// The ten answers of the catalog report.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Percentage of rows per `type`, most frequent first.
    pub type_shares: Vec<(String, f64)>,
    pub peak_year_added: Option<i32>,
    pub top_country: Option<String>,
    pub top_rating: Option<String>,
    /// Minutes.
    pub avg_movie_duration: Option<f64>,
    pub avg_tv_seasons: Option<f64>,
    pub release_added_correlation: Option<f64>,
    pub tv_share_by_year: BTreeMap<i32, f64>,
    pub top_directors: Frequencies,
    pub december_by_type: Frequencies,
}

/// Read-only queries over a cleaned catalog.
pub struct CatalogAnalyzer;

impl CatalogAnalyzer {
    pub fn analyze(df: &DataFrame) -> Result<AnalysisReport, AnalyzerError> {
        let types = str_values(df, TYPE)?;
        let durations = f64_values(df, DURATION_NUM)?;
        let years_added = i32_values(df, YEAR_ADDED)?;

        let report = AnalysisReport {
            type_shares: Self::type_shares(&types),
            peak_year_added: Self::peak_year(&years_added),
            top_country: most_frequent(&split_counts(df, COUNTRY, None)?).map(str::to_string),
            top_rating: most_frequent(&column_counts(df, RATING)?).map(str::to_string),
            avg_movie_duration: Self::mean_duration(&types, &durations, MOVIE)
                .map(|m| round_to(m, MOVIE_DURATION_DECIMALS)),
            avg_tv_seasons: Self::mean_duration(&types, &durations, TV_SHOW)
                .map(|m| round_to(m, TV_SEASONS_DECIMALS)),
            release_added_correlation: Self::release_added_correlation(df)?
                .map(|r| round_to(r, YEAR_CORRELATION_DECIMALS)),
            tv_share_by_year: Self::tv_share_by_year(df, &years_added)?,
            top_directors: Self::top_directors(df)?,
            december_by_type: Self::december_by_type(df, &types)?,
        };

        debug!(rows = df.height(), "Analysis complete");
        Ok(report)
    }

    /// 1. Relative frequency of each `type` value, times 100.
    fn type_shares(types: &[Option<String>]) -> Vec<(String, f64)> {
        let counts = value_counts(types.iter().flatten());
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        counts
            .into_iter()
            .map(|(kind, n)| (kind, n as f64 / total as f64 * 100.0))
            .collect()
    }

    /// 2. Year with the most additions.
    fn peak_year(years_added: &[Option<i32>]) -> Option<i32> {
        count_by(years_added.iter().flatten().copied())
            .first()
            .map(|&(year, _)| year)
    }

    /// 5./6. Mean `duration_num` over rows of one `type`.
    fn mean_duration(types: &[Option<String>], durations: &[Option<f64>], kind: &str) -> Option<f64> {
        let values: Vec<f64> = types
            .iter()
            .zip(durations)
            .filter(|(t, _)| t.as_deref() == Some(kind))
            .filter_map(|(_, d)| *d)
            .collect();
        mean(&values)
    }

    /// 7. Pearson correlation of `release_year` and `year_added`.
    fn release_added_correlation(df: &DataFrame) -> PolarsResult<Option<f64>> {
        let released = f64_values(df, RELEASE_YEAR)?;
        let added = f64_values(df, YEAR_ADDED)?;
        let (xs, ys) = paired(&released, &added);
        Ok(pearson(&xs, &ys))
    }

    /// 8. Share of TV shows among each year's additions.
    fn tv_share_by_year(df: &DataFrame, years_added: &[Option<i32>]) -> PolarsResult<BTreeMap<i32, f64>> {
        let is_tv = i32_values(df, IS_TV_SHOW)?;

        let mut tally: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
        for (year, tv) in years_added.iter().zip(&is_tv) {
            let Some(year) = year.filter(|y| TV_SHARE_YEARS.contains(y)) else {
                continue;
            };
            let entry = tally.entry(year).or_default();
            entry.0 += 1;
            if *tv == Some(1) {
                entry.1 += 1;
            }
        }

        Ok(tally
            .into_iter()
            .map(|(year, (rows, shows))| {
                (year, round_to(shows as f64 / rows as f64, TV_SHARE_DECIMALS))
            })
            .collect())
    }

    /// 9. Most frequent individual directors, sentinel excluded.
    fn top_directors(df: &DataFrame) -> PolarsResult<Frequencies> {
        let mut directors = split_counts(df, DIRECTOR, Some(UNKNOWN))?;
        directors.retain(|(name, _)| name != UNKNOWN);
        directors.truncate(TOP_DIRECTORS);
        Ok(directors)
    }

    /// 10. Rows per `type` added in December of any year.
    fn december_by_type(df: &DataFrame, types: &[Option<String>]) -> PolarsResult<Frequencies> {
        let added = i32_values(df, DATE_ADDED)?;
        let december = types
            .iter()
            .zip(&added)
            .filter(|(_, days)| {
                days.and_then(days_to_date)
                    .is_some_and(|date| date.month() == DECEMBER)
            })
            .filter_map(|(kind, _)| kind.as_deref());
        Ok(value_counts(december))
    }
}

fn write_optional<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: &Option<T>) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, "  {}", v),
        None => writeln!(f, "  n/a"),
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &Frequencies) -> fmt::Result {
    if counts.is_empty() {
        return writeln!(f, "  n/a");
    }
    for (name, count) in counts {
        writeln!(f, "  {:<24} {}", name, count)?;
    }
    Ok(())
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "1. Share of movies and TV shows (%):")?;
        for (kind, share) in &self.type_shares {
            writeln!(f, "  {:<24} {:.2}", kind, share)?;
        }

        writeln!(f, "2. Year with the most additions:")?;
        write_optional(f, &self.peak_year_added)?;

        writeln!(f, "3. Leading country:")?;
        write_optional(f, &self.top_country)?;

        writeln!(f, "4. Most common rating:")?;
        write_optional(f, &self.top_rating)?;

        writeln!(f, "5. Average movie duration (min):")?;
        write_optional(f, &self.avg_movie_duration)?;

        writeln!(f, "6. Average number of TV show seasons:")?;
        write_optional(f, &self.avg_tv_seasons)?;

        writeln!(f, "7. Correlation of release_year and year_added:")?;
        write_optional(f, &self.release_added_correlation)?;

        writeln!(
            f,
            "8. Share of TV shows ({}-{}):",
            TV_SHARE_YEARS.start(),
            TV_SHARE_YEARS.end()
        )?;
        if self.tv_share_by_year.is_empty() {
            writeln!(f, "  n/a")?;
        }
        for (year, share) in &self.tv_share_by_year {
            writeln!(f, "  {:<24} {}", year, share)?;
        }

        writeln!(f, "9. Top {} directors:", TOP_DIRECTORS)?;
        write_counts(f, &self.top_directors)?;

        writeln!(f, "10. Content added in December:")?;
        write_counts(f, &self.december_by_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataCleaner;

    fn catalog() -> DataFrame {
        let raw = polars::df!(
            "type" => ["Movie", "Movie", "TV Show", "Movie", "TV Show", "TV Show", "Movie", "Movie"],
            "director" => [
                Some("Ana Ruiz"), Some("Ana Ruiz, Li Wei"), None, Some("Li Wei"),
                None, Some("Ana Ruiz"), None, Some("Omar Sy"),
            ],
            "cast" => ["c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8"],
            "country" => [
                Some("United States, Canada"), Some("Canada"), Some("India"), Some("United States"),
                None, Some("Canada, India"), Some("France"), Some("Canada"),
            ],
            "date_added" => [
                "December 1, 2019", "March 3, 2019", "December 24, 2020", "July 7, 2016",
                "January 9, 2020", "May 5, 2021", "December 31, 2021", "June 6, 2019",
            ],
            "release_year" => [2019i64, 2018, 2020, 2001, 2015, 2021, 2021, 2010],
            "rating" => ["TV-MA", "R", "TV-MA", "PG", "TV-14", "TV-MA", "R", "PG-13"],
            "duration" => ["90 min", "120 min", "2 Seasons", "100 min", "1 Season", "4 Seasons", "unknown", "110 min"]
        )
        .unwrap();
        DataCleaner::clean(raw).unwrap()
    }

    #[test]
    fn type_shares_sum_to_one_hundred() {
        let report = CatalogAnalyzer::analyze(&catalog()).unwrap();
        let total: f64 = report.type_shares.iter().map(|(_, s)| s).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(report.type_shares[0].0, "Movie");
        assert!((report.type_shares[0].1 - 62.5).abs() < 1e-9);
    }

    #[test]
    fn finds_modes() {
        let report = CatalogAnalyzer::analyze(&catalog()).unwrap();
        assert_eq!(report.peak_year_added, Some(2019));
        assert_eq!(report.top_country.as_deref(), Some("Canada"));
        assert_eq!(report.top_rating.as_deref(), Some("TV-MA"));
    }

    #[test]
    fn averages_durations_per_type() {
        let report = CatalogAnalyzer::analyze(&catalog()).unwrap();
        // 90, 120, 100, 110; the unparseable movie is excluded
        assert_eq!(report.avg_movie_duration, Some(105.0));
        // 2, 1, 4 seasons
        assert_eq!(report.avg_tv_seasons, Some(2.33));
    }

    #[test]
    fn correlation_is_rounded_and_bounded() {
        let report = CatalogAnalyzer::analyze(&catalog()).unwrap();
        let r = report.release_added_correlation.unwrap();
        assert!((-1.0..=1.0).contains(&r));
        assert_eq!(r, round_to(r, YEAR_CORRELATION_DECIMALS));
    }

    #[test]
    fn tv_share_is_per_year_in_range() {
        let report = CatalogAnalyzer::analyze(&catalog()).unwrap();
        let expected: BTreeMap<i32, f64> =
            [(2016, 0.0), (2019, 0.0), (2020, 1.0), (2021, 0.5)].into_iter().collect();
        assert_eq!(report.tv_share_by_year, expected);
    }

    #[test]
    fn top_directors_skip_unknown() {
        let report = CatalogAnalyzer::analyze(&catalog()).unwrap();
        assert_eq!(
            report.top_directors,
            vec![
                ("Ana Ruiz".to_string(), 3),
                ("Li Wei".to_string(), 2),
                ("Omar Sy".to_string(), 1),
            ]
        );
        assert!(report.top_directors.iter().all(|(name, _)| name != UNKNOWN));
    }

    #[test]
    fn counts_december_additions_by_type() {
        let report = CatalogAnalyzer::analyze(&catalog()).unwrap();
        assert_eq!(
            report.december_by_type,
            vec![("Movie".to_string(), 2), ("TV Show".to_string(), 1)]
        );
    }

    #[test]
    fn empty_slices_are_undefined() {
        let raw = polars::df!(
            "type" => ["TV Show"],
            "director" => ["Unknown"],
            "cast" => ["c1"],
            "country" => ["Japan"],
            "date_added" => ["April 1, 2014"],
            "release_year" => [2014i64],
            "rating" => ["TV-Y"],
            "duration" => ["1 Season"]
        )
        .unwrap();
        let df = DataCleaner::clean(raw).unwrap();

        let report = CatalogAnalyzer::analyze(&df).unwrap();
        assert_eq!(report.avg_movie_duration, None);
        assert_eq!(report.avg_tv_seasons, Some(1.0));
        assert_eq!(report.release_added_correlation, None);
        assert!(report.tv_share_by_year.is_empty());
        assert!(report.top_directors.is_empty());
        assert!(report.december_by_type.is_empty());

        let text = report.to_string();
        assert!(text.contains("5. Average movie duration (min):\n  n/a"));
    }

    #[test]
    fn report_lists_all_ten_answers() {
        let text = CatalogAnalyzer::analyze(&catalog()).unwrap().to_string();
        for n in 1..=10 {
            assert!(text.contains(&format!("{}. ", n)), "missing answer {n}");
        }
    }
}
