//! Frequency counting shared by the analyzer and the bar charts.

use crate::data::schema::str_values;
use polars::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;

/// Value counts ordered by descending count; ties keep first-seen order.
pub type Frequencies = Vec<(String, usize)>;

/// Count each distinct item, most frequent first; ties keep first-seen order.
pub fn count_by<T, I>(values: I) -> Vec<(T, usize)>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for value in values {
        match index.get(&value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Count each distinct text value.
pub fn value_counts<I, S>(values: I) -> Frequencies
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    count_by(values.into_iter().map(|v| v.as_ref().to_string()))
}

/// Split-count a comma-separated text column.
///
/// Each listed value counts once, whitespace-trimmed; empty tokens are
/// ignored. Rows whose whole value equals `exclude` are skipped.
pub fn split_counts(df: &DataFrame, column: &str, exclude: Option<&str>) -> PolarsResult<Frequencies> {
    let values = str_values(df, column)?;
    let tokens = values
        .iter()
        .flatten()
        .filter(|value| Some(value.as_str()) != exclude)
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    Ok(value_counts(tokens))
}

/// Count the non-null values of a text column.
pub fn column_counts(df: &DataFrame, column: &str) -> PolarsResult<Frequencies> {
    let values = str_values(df, column)?;
    Ok(value_counts(values.iter().flatten()))
}

/// The most frequent value, if any.
pub fn most_frequent(freq: &Frequencies) -> Option<&str> {
    freq.first().map(|(value, _)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_sorted_descending_with_stable_ties() {
        let freq = value_counts(["b", "a", "c", "a", "c", "d"]);
        assert_eq!(
            freq,
            vec![
                ("a".to_string(), 2),
                ("c".to_string(), 2),
                ("b".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
        assert_eq!(most_frequent(&freq), Some("a"));
    }

    #[test]
    fn split_counts_each_listed_value() {
        let df = polars::df!(
            "country" => [Some("United States, Canada"), Some("Canada"), None, Some("France,"), Some("United States")]
        )
        .unwrap();

        let freq = split_counts(&df, "country", None).unwrap();
        assert_eq!(
            freq,
            vec![
                ("United States".to_string(), 2),
                ("Canada".to_string(), 2),
                ("France".to_string(), 1),
            ]
        );
    }

    #[test]
    fn split_counts_skips_excluded_rows() {
        let df = polars::df!(
            "director" => ["Unknown", "Unknown", "Ana Ruiz, Li Wei", "Li Wei"]
        )
        .unwrap();

        let freq = split_counts(&df, "director", Some("Unknown")).unwrap();
        assert_eq!(freq[0], ("Li Wei".to_string(), 2));
        assert!(freq.iter().all(|(name, _)| name != "Unknown"));
    }

    #[test]
    fn counts_any_hashable_item() {
        let years = count_by([2019, 2020, 2020, 2021, 2019, 2020]);
        assert_eq!(years, vec![(2020, 3), (2019, 2), (2021, 1)]);
    }

    #[test]
    fn empty_input_has_no_mode() {
        let freq = value_counts(Vec::<String>::new());
        assert!(freq.is_empty());
        assert_eq!(most_frequent(&freq), None);
    }
}
