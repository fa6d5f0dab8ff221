use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::modules::archive::infrastructure::adapters::loc::models::SearchItem;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:18|19|20)\d{2}\b").unwrap());

/// First standalone year (1800-2099) embedded in a date-like string.
pub fn extract_year(date: &str) -> Option<i32> {
    YEAR_PATTERN
        .find(date)
        .and_then(|found| found.as_str().parse().ok())
}

/// Ascending, deduplicated years found in the items' dates. Items without a
/// recognisable year are skipped.
pub fn build_years_index(items: &[SearchItem]) -> Vec<i32> {
    let years: BTreeSet<i32> = items
        .iter()
        .filter_map(|item| {
            item.date
                .as_deref()
                .or_else(|| item.item.as_ref().and_then(|block| block.date.as_deref()))
        })
        .filter_map(extract_year)
        .collect();

    years.into_iter().collect()
}
