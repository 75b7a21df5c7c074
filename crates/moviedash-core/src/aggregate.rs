//! Statistics over a diary snapshot.
//!
//! Everything here is pure: the same slice of entries always produces the same
//! histogram and summary, and no input makes these functions fail. Fields that
//! are absent or malformed are skipped through the two predicates below.

use moviedash_models::{SummaryStats, WatchedEntry, YearCount, YearHistogram};
use serde::Serialize;

/// Earliest and latest years accepted as a grouping key
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// True when the entry has a year that can be used as a histogram key
pub fn has_valid_year(entry: &WatchedEntry) -> bool {
    matches!(entry.year, Some(year) if (MIN_YEAR..=MAX_YEAR).contains(&year))
}

/// True when the entry has a rating that may contribute to the average
pub fn has_valid_rating(entry: &WatchedEntry) -> bool {
    matches!(entry.rating, Some(rating) if rating.is_finite() && rating >= 0.0)
}

/// Count entries per release year, skipping entries without a valid year
pub fn compute_year_histogram(entries: &[WatchedEntry]) -> YearHistogram {
    entries
        .iter()
        .filter(|e| has_valid_year(e))
        .filter_map(|e| e.year)
        .collect()
}

/// Summary statistics for `entries`.
///
/// `average_rating` is `0.0` when no entry has a valid rating. When several
/// years share the highest count, the one encountered first in `entries` wins.
pub fn compute_summary_stats(entries: &[WatchedEntry]) -> SummaryStats {
    let histogram = compute_year_histogram(entries);
    summarize(entries, &histogram)
}

/// Histogram and summary computed from the same entries
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Aggregate {
    pub stats: SummaryStats,
    pub histogram: YearHistogram,
}

pub fn aggregate(entries: &[WatchedEntry]) -> Aggregate {
    let histogram = compute_year_histogram(entries);
    let stats = summarize(entries, &histogram);
    Aggregate { stats, histogram }
}

fn summarize(entries: &[WatchedEntry], histogram: &YearHistogram) -> SummaryStats {
    SummaryStats {
        total_movies: entries.len(),
        average_rating: average_rating(entries),
        most_watched_year: most_watched_year(histogram),
    }
}

fn average_rating(entries: &[WatchedEntry]) -> f64 {
    let (sum, count) = entries
        .iter()
        .filter(|e| has_valid_rating(e))
        .filter_map(|e| e.rating)
        .fold((0.0_f64, 0_usize), |(sum, count), rating| (sum + rating, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// Strictly-greater fold in first-seen order: earlier years keep ties
fn most_watched_year(histogram: &YearHistogram) -> Option<YearCount> {
    histogram.iter_first_seen().fold(None, |best: Option<YearCount>, candidate| match best {
        Some(current) if candidate.count <= current.count => Some(current),
        _ => Some(candidate),
    })
}
