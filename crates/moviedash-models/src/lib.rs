pub mod catalog;
pub mod stats;
pub mod watched_entry;

pub use catalog::{CatalogKind, CatalogPage, Genre, GenreList, Movie};
pub use stats::{SummaryStats, YearCount, YearHistogram};
pub use watched_entry::WatchedEntry;
