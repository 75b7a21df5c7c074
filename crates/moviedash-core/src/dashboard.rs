use chrono::{DateTime, Utc};
use moviedash_models::{SummaryStats, WatchedEntry, YearHistogram};
use moviedash_sources::DiarySource;
use std::cmp::Ordering;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, Aggregate};

/// Identifies one fetch. Later tokens supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing request tokens
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn latest(&self) -> Option<RequestToken> {
        (self.latest > 0).then_some(RequestToken(self.latest))
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// What a diary fetch was asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryQuery {
    pub source: String,
    pub username: String,
}

impl DiaryQuery {
    pub fn new(source: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            username: username.into(),
        }
    }
}

/// How to order entries for the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    /// Most recently watched first
    #[default]
    Watched,
    /// Highest rated first, unrated last
    Rating,
    Title,
}

/// Immutable entry collection with the aggregate computed from it.
///
/// A new fetch produces a new snapshot; existing snapshots never change, so
/// they can be shared freely between the list, stats and chart views.
#[derive(Debug, Clone)]
pub struct DiarySnapshot {
    query: DiaryQuery,
    entries: Arc<[WatchedEntry]>,
    aggregate: Arc<Aggregate>,
    fetched_at: DateTime<Utc>,
}

impl DiarySnapshot {
    pub fn new(query: DiaryQuery, entries: Vec<WatchedEntry>) -> Self {
        let entries: Arc<[WatchedEntry]> = entries.into();
        let aggregate = Arc::new(aggregate(&entries));
        Self {
            query,
            entries,
            aggregate,
            fetched_at: Utc::now(),
        }
    }

    pub fn query(&self) -> &DiaryQuery {
        &self.query
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &SummaryStats {
        &self.aggregate.stats
    }

    pub fn histogram(&self) -> &YearHistogram {
        &self.aggregate.histogram
    }

    pub fn aggregate(&self) -> &Aggregate {
        &self.aggregate
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Entries in display order, without touching the snapshot itself
    pub fn ordered_entries(&self, order: EntryOrder) -> Vec<&WatchedEntry> {
        let mut entries: Vec<&WatchedEntry> = self.entries.iter().collect();
        match order {
            EntryOrder::Watched => entries.sort_by(|a, b| b.watched_date.cmp(&a.watched_date)),
            EntryOrder::Rating => entries.sort_by(|a, b| compare_ratings_desc(a.rating, b.rating)),
            EntryOrder::Title => entries.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        }
        entries
    }
}

fn compare_ratings_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// What the dashboard currently shows
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Nothing requested yet
    Idle,
    Loading {
        token: RequestToken,
        query: DiaryQuery,
        previous: Option<DiarySnapshot>,
    },
    /// Fetched successfully; may hold zero entries
    Loaded(DiarySnapshot),
    Failed {
        query: DiaryQuery,
        message: String,
        previous: Option<DiarySnapshot>,
    },
}

/// Diary view state: the current load state plus the request tokens that
/// decide which fetch completion is allowed to replace it
#[derive(Debug)]
pub struct Dashboard {
    state: LoadState,
    tracker: RequestTracker,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            tracker: RequestTracker::new(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    /// Latest successfully loaded snapshot, if any (kept across failures)
    pub fn snapshot(&self) -> Option<&DiarySnapshot> {
        match &self.state {
            LoadState::Idle => None,
            LoadState::Loaded(snapshot) => Some(snapshot),
            LoadState::Loading { previous, .. } | LoadState::Failed { previous, .. } => previous.as_ref(),
        }
    }

    /// Start a fetch; any earlier in-flight fetch becomes stale
    pub fn begin(&mut self, query: DiaryQuery) -> RequestToken {
        let token = self.tracker.issue();
        let previous = self.snapshot().cloned();
        debug!(token = token.value(), source = %query.source, username = %query.username, "Diary fetch started");
        self.state = LoadState::Loading { token, query, previous };
        token
    }

    /// Apply a fetch result.
    ///
    /// Returns false and leaves the state untouched when `token` is not the
    /// in-flight request (superseded, or already completed).
    pub fn complete<E: Display>(&mut self, token: RequestToken, result: Result<Vec<WatchedEntry>, E>) -> bool {
        let (query, previous) = match &self.state {
            LoadState::Loading { token: current, query, previous } if *current == token && self.tracker.is_latest(token) => {
                (query.clone(), previous.clone())
            }
            _ => {
                debug!(token = token.value(), "Dropping stale diary fetch result");
                return false;
            }
        };

        self.state = match result {
            Ok(entries) => {
                info!(
                    source = %query.source,
                    username = %query.username,
                    entries = entries.len(),
                    "Diary loaded"
                );
                LoadState::Loaded(DiarySnapshot::new(query, entries))
            }
            Err(e) => {
                warn!(source = %query.source, username = %query.username, error = %e, "Diary fetch failed");
                LoadState::Failed {
                    query,
                    message: e.to_string(),
                    previous,
                }
            }
        };
        true
    }

    /// Fetch `username`'s diary from `source` and apply the result
    pub async fn refresh(&mut self, source: &dyn DiarySource, username: &str) -> bool {
        let token = self.begin(DiaryQuery::new(source.source_name(), username));
        let result = source.fetch_diary(username).await;
        self.complete(token, result)
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(title: &str, day: u32, year: Option<i32>, rating: Option<f64>) -> WatchedEntry {
        let watched = Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap();
        WatchedEntry::new(title, watched).with_year(year).with_rating(rating)
    }

    fn query() -> DiaryQuery {
        DiaryQuery::new("test", "alice")
    }

    #[test]
    fn test_tracker_issues_increasing_tokens() {
        let mut tracker = RequestTracker::new();
        assert_eq!(tracker.latest(), None);
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(second > first);
        assert!(tracker.is_latest(second));
        assert!(!tracker.is_latest(first));
    }

    #[test]
    fn test_successful_fetch_builds_snapshot() {
        let mut dashboard = Dashboard::new();
        assert!(dashboard.snapshot().is_none());

        let token = dashboard.begin(query());
        assert!(dashboard.is_loading());

        let applied = dashboard.complete::<String>(
            token,
            Ok(vec![entry("A", 1, Some(2020), Some(4.0)), entry("B", 2, Some(2020), Some(2.0))]),
        );
        assert!(applied);

        let snapshot = dashboard.snapshot().unwrap();
        assert_eq!(snapshot.stats().total_movies, 2);
        assert_eq!(snapshot.stats().average_rating, 3.0);
        assert_eq!(snapshot.histogram().get(2020), Some(2));
        assert_eq!(snapshot.query().username, "alice");
    }

    #[test]
    fn test_empty_fetch_is_loaded_not_failed() {
        let mut dashboard = Dashboard::new();
        let token = dashboard.begin(query());
        dashboard.complete::<String>(token, Ok(Vec::new()));

        match dashboard.state() {
            LoadState::Loaded(snapshot) => {
                assert!(snapshot.is_empty());
                assert_eq!(snapshot.stats(), &SummaryStats::default());
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut dashboard = Dashboard::new();
        let first = dashboard.begin(query());
        let second = dashboard.begin(query());

        // The older request resolves last-but-wrong: it must not overwrite state
        assert!(dashboard.complete::<String>(second, Ok(vec![entry("New", 2, None, None)])));
        assert!(!dashboard.complete::<String>(first, Ok(vec![entry("Old", 1, None, None)])));

        let snapshot = dashboard.snapshot().unwrap();
        assert_eq!(snapshot.entries()[0].title, "New");
    }

    #[test]
    fn test_superseded_request_cannot_complete_while_newer_is_in_flight() {
        let mut dashboard = Dashboard::new();
        let first = dashboard.begin(query());
        let _second = dashboard.begin(query());
        assert!(!dashboard.complete::<String>(first, Ok(Vec::new())));
        assert!(dashboard.is_loading());
    }

    #[test]
    fn test_double_completion_is_ignored() {
        let mut dashboard = Dashboard::new();
        let token = dashboard.begin(query());
        assert!(dashboard.complete::<String>(token, Ok(vec![entry("A", 1, None, None)])));
        assert!(!dashboard.complete::<String>(token, Ok(Vec::new())));
        assert_eq!(dashboard.snapshot().unwrap().entries().len(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut dashboard = Dashboard::new();
        let token = dashboard.begin(query());
        dashboard.complete::<String>(token, Ok(vec![entry("Kept", 1, Some(1999), None)]));

        let token = dashboard.begin(query());
        assert!(dashboard.complete(token, Err("network unreachable")));

        match dashboard.state() {
            LoadState::Failed { message, previous, .. } => {
                assert_eq!(message, "network unreachable");
                assert_eq!(previous.as_ref().unwrap().entries()[0].title, "Kept");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(dashboard.snapshot().unwrap().entries().len(), 1);
    }

    #[test]
    fn test_ordered_entries() {
        let snapshot = DiarySnapshot::new(
            query(),
            vec![
                entry("beta", 1, None, Some(2.0)),
                entry("Alpha", 3, None, None),
                entry("gamma", 2, None, Some(4.5)),
            ],
        );

        let titles = |order| {
            snapshot
                .ordered_entries(order)
                .iter()
                .map(|e| e.title.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(titles(EntryOrder::Watched), vec!["Alpha", "gamma", "beta"]);
        assert_eq!(titles(EntryOrder::Rating), vec!["gamma", "beta", "Alpha"]);
        assert_eq!(titles(EntryOrder::Title), vec!["Alpha", "beta", "gamma"]);
        // Ordering never mutates the snapshot
        assert_eq!(snapshot.entries()[0].title, "beta");
    }
}
