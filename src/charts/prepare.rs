//! Chart inputs extracted once from the cleaned catalog.

use crate::data::schema::{
    f64_values, str_values, COUNTRY, DURATION_NUM, MOVIE, RATING, RELEASE_YEAR, TV_SHOW, TYPE,
    YEAR_ADDED,
};
use crate::stats::descriptive::correlation_matrix;
use crate::stats::frequency::{column_counts, split_counts, Frequencies};
use polars::prelude::*;
use std::collections::BTreeSet;

pub const TOP_COUNTRIES: usize = 10;

/// Numeric columns of the correlation heatmap, in display order.
pub const CORRELATION_COLUMNS: [&str; 3] = [RELEASE_YEAR, YEAR_ADDED, DURATION_NUM];

/// Row counts of `type` × `rating`, both axes sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Contingency {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl Contingency {
    pub fn from_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)> + Clone) -> Self {
        let rows: Vec<String> = pairs
            .clone()
            .map(|(r, _)| r.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let columns: Vec<String> = pairs
            .clone()
            .map(|(_, c)| c.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut counts = vec![vec![0usize; columns.len()]; rows.len()];
        for (r, c) in pairs {
            // Both lookups succeed: the axes were built from these pairs
            if let (Ok(ri), Ok(ci)) = (
                rows.binary_search_by(|x| x.as_str().cmp(r)),
                columns.binary_search_by(|x| x.as_str().cmp(c)),
            ) {
                counts[ri][ci] += 1;
            }
        }

        Self {
            rows,
            columns,
            counts,
        }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Everything the six charts draw.
#[derive(Debug, Clone)]
pub struct ChartInputs {
    pub movie_durations: Vec<f64>,
    pub tv_seasons: Vec<f64>,
    pub top_countries: Frequencies,
    pub ratings: Frequencies,
    pub correlation: Vec<Vec<Option<f64>>>,
    /// `(type, points)` of release year vs year added, types in first-seen order.
    pub release_vs_added: Vec<(String, Vec<(f64, f64)>)>,
    pub movie_release_vs_duration: Vec<(f64, f64)>,
    pub contingency: Contingency,
}

impl ChartInputs {
    pub fn from_frame(df: &DataFrame) -> PolarsResult<Self> {
        let types = str_values(df, TYPE)?;
        let ratings = str_values(df, RATING)?;
        let durations = f64_values(df, DURATION_NUM)?;
        let released = f64_values(df, RELEASE_YEAR)?;
        let added = f64_values(df, YEAR_ADDED)?;

        let durations_of = |kind: &str| -> Vec<f64> {
            types
                .iter()
                .zip(&durations)
                .filter(|(t, _)| t.as_deref() == Some(kind))
                .filter_map(|(_, d)| *d)
                .collect()
        };

        let mut top_countries = split_counts(df, COUNTRY, None)?;
        top_countries.truncate(TOP_COUNTRIES);

        let mut release_vs_added: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
        for ((kind, x), y) in types.iter().zip(&released).zip(&added) {
            let (Some(kind), Some(x), Some(y)) = (kind, x, y) else {
                continue;
            };
            match release_vs_added.iter_mut().find(|(k, _)| k == kind) {
                Some((_, points)) => points.push((*x, *y)),
                None => release_vs_added.push((kind.clone(), vec![(*x, *y)])),
            }
        }

        let movie_release_vs_duration = types
            .iter()
            .zip(released.iter().zip(&durations))
            .filter(|(t, _)| t.as_deref() == Some(MOVIE))
            .filter_map(|(_, (x, y))| Some(((*x)?, (*y)?)))
            .collect();

        let contingency = Contingency::from_pairs(
            types
                .iter()
                .zip(&ratings)
                .filter_map(|(t, r)| Some((t.as_deref()?, r.as_deref()?))),
        );

        Ok(Self {
            movie_durations: durations_of(MOVIE),
            tv_seasons: durations_of(TV_SHOW),
            top_countries,
            ratings: column_counts(df, RATING)?,
            correlation: Self::complete_case_correlation(df)?,
            release_vs_added,
            movie_release_vs_duration,
            contingency,
        })
    }

    /// Pearson matrix over rows where every correlation column is present.
    fn complete_case_correlation(df: &DataFrame) -> PolarsResult<Vec<Vec<Option<f64>>>> {
        let raw = CORRELATION_COLUMNS
            .iter()
            .map(|name| f64_values(df, name))
            .collect::<PolarsResult<Vec<_>>>()?;

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); raw.len()];
        for row in 0..df.height() {
            let values: Option<Vec<f64>> = raw.iter().map(|col| col[row]).collect();
            if let Some(values) = values {
                for (column, value) in columns.iter_mut().zip(values) {
                    column.push(value);
                }
            }
        }

        Ok(correlation_matrix(&columns))
    }
}
