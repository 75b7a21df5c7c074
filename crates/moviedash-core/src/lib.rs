pub mod aggregate;
pub mod dashboard;
pub mod overview;

pub use aggregate::{Aggregate, aggregate, compute_summary_stats, compute_year_histogram, has_valid_rating, has_valid_year};
pub use dashboard::{Dashboard, DiaryQuery, DiarySnapshot, EntryOrder, LoadState, RequestToken, RequestTracker};
pub use overview::{OverviewState, Slot};
