use async_trait::async_trait;
use moviedash_models::{CatalogKind, CatalogPage, Genre, Movie, WatchedEntry};

use crate::SourceError;

/// Movie catalog listings (popular, top rated, genres)
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn movies(&self, kind: CatalogKind, page: u32) -> Result<CatalogPage<Movie>, SourceError>;

    async fn genres(&self) -> Result<Vec<Genre>, SourceError>;

    async fn popular(&self, page: u32) -> Result<CatalogPage<Movie>, SourceError> {
        self.movies(CatalogKind::Popular, page).await
    }

    async fn top_rated(&self, page: u32) -> Result<CatalogPage<Movie>, SourceError> {
        self.movies(CatalogKind::TopRated, page).await
    }
}

/// A per-user feed of watched movies
#[async_trait]
pub trait DiarySource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Fetch every diary entry for `username`, oldest-first order is not guaranteed
    async fn fetch_diary(&self, username: &str) -> Result<Vec<WatchedEntry>, SourceError>;
}
