//! Client-side search and field filtering over cached collections.
//!
//! The public list pages narrow the cached collection with a free-text query
//! plus a handful of field filters. Everything here is pure: the same input
//! always yields the same output, nothing is re-sorted, and malformed or
//! missing field values simply fail to match.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::Datelike;

use crate::error::CoreError;
use crate::types::Date;

/// Selected value per filter key. Keys are ordered so iteration is stable.
pub type FilterMap<K> = BTreeMap<K, String>;

/// A record the filter engine can search and narrow.
pub trait Filterable {
    /// The filter keys this entity kind supports.
    type Key: Copy + Ord;

    /// Fields searched by the free-text query. `None` never matches.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Whether the record satisfies one active filter.
    fn matches_filter(&self, key: Self::Key, value: &str) -> bool;
}

/// Derive the visible subset of `records`.
///
/// - A non-empty `query` keeps records where any search field contains it,
///   ignoring case.
/// - Each filter with a non-empty value narrows the result further; filters
///   are combined with AND, so their order is irrelevant.
/// - The relative order of `records` is preserved.
pub fn filter_records<T>(records: &[T], query: &str, filters: &FilterMap<T::Key>) -> Vec<T>
where
    T: Filterable + Clone,
{
    let needle = (!query.is_empty()).then(|| query.to_lowercase());
    let active: Vec<(T::Key, &str)> = filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (*key, value.as_str()))
        .collect();

    records
        .iter()
        .filter(|record| match &needle {
            Some(needle) => record
                .search_fields()
                .into_iter()
                .any(|field| contains_ci(field, needle)),
            None => true,
        })
        .filter(|record| {
            active
                .iter()
                .all(|(key, value)| record.matches_filter(*key, value))
        })
        .cloned()
        .collect()
}

/// Parse `(key, value)` pairs into a filter map, rejecting unknown keys.
///
/// Empty values are kept; [`filter_records`] treats them as inactive.
pub fn parse_filters<'a, K, I>(pairs: I) -> Result<FilterMap<K>, CoreError>
where
    K: FromStr<Err = CoreError> + Ord,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| Ok((key.parse::<K>()?, value.to_string())))
        .collect()
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Case-insensitive substring test. `needle_lower` must already be lower-cased.
pub fn contains_ci(field: Option<&str>, needle_lower: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle_lower))
}

/// Whether the four-digit calendar year of `date` equals `year`.
pub fn year_matches(date: Option<Date>, year: &str) -> bool {
    date.is_some_and(|d| format!("{:04}", d.year()) == year)
}

/// Exact, case-sensitive equality used for closed enumerations.
pub fn exact_matches(field: &str, value: &str) -> bool {
    field == value
}

/// Distinct years present in `records` according to `date_of`, newest first.
pub fn available_years<T, F>(records: &[T], date_of: F) -> Vec<i32>
where
    F: Fn(&T) -> Option<Date>,
{
    let years: BTreeSet<i32> = records
        .iter()
        .filter_map(|r| date_of(r).map(|d| d.year()))
        .collect();
    years.into_iter().rev().collect()
}
