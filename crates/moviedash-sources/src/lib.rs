pub mod error;
pub mod factory;
pub mod http;
pub mod letterboxd;
pub mod tmdb;
pub mod traits;
pub mod trakt;

pub use error::SourceError;
pub use factory::{DiaryOptions, DiarySourceFactory, DiarySourceRegistry, create_catalog_source};
pub use letterboxd::LetterboxdExport;
pub use tmdb::TmdbClient;
pub use traits::{CatalogSource, DiarySource};
pub use trakt::TraktDiary;
