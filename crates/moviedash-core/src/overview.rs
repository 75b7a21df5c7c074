use moviedash_models::{CatalogPage, Genre, Movie};
use moviedash_sources::CatalogSource;
use std::fmt::Display;
use tracing::warn;

/// One independently loaded piece of the overview
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Slot<T> {
    fn from_result<E: Display>(label: &str, result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Slot::Ready(value),
            Err(e) => {
                warn!(slot = label, error = %e, "Overview fetch failed");
                Slot::Failed(e.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Slot::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Slot::Ready(_))
    }
}

/// Catalog overview: popular movies, top rated movies and the genre list
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewState {
    pub popular: Slot<CatalogPage<Movie>>,
    pub genres: Slot<Vec<Genre>>,
    pub top_rated: Slot<CatalogPage<Movie>>,
}

impl OverviewState {
    pub fn new() -> Self {
        Self {
            popular: Slot::Loading,
            genres: Slot::Loading,
            top_rated: Slot::Loading,
        }
    }

    /// Fetch all three slots one after another. A failed slot does not stop
    /// the others from loading.
    pub async fn load(source: &dyn CatalogSource, page: u32) -> Self {
        let mut state = Self::new();
        state.popular = Slot::from_result("popular", source.popular(page).await);
        state.genres = Slot::from_result("genres", source.genres().await);
        state.top_rated = Slot::from_result("top_rated", source.top_rated(page).await);
        state
    }

    pub fn popular_count(&self) -> Option<usize> {
        self.popular.ready().map(|page| page.len())
    }

    pub fn top_rated_count(&self) -> Option<usize> {
        self.top_rated.ready().map(|page| page.len())
    }

    pub fn genre_count(&self) -> Option<usize> {
        self.genres.ready().map(|genres| genres.len())
    }

    pub fn is_complete(&self) -> bool {
        self.popular.is_ready() && self.genres.is_ready() && self.top_rated.is_ready()
    }
}

impl Default for OverviewState {
    fn default() -> Self {
        Self::new()
    }
}
