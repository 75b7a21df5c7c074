use moviedash_models::{CatalogKind, CatalogPage, Genre, GenreList, Movie};
use reqwest::Client;
use tracing::debug;

use crate::http::send_json;
use crate::SourceError;

/// TMDB refuses listing pages beyond this
pub const MAX_PAGE: u32 = 500;

pub fn validate_page(page: u32) -> Result<(), SourceError> {
    if page == 0 || page > MAX_PAGE {
        return Err(SourceError::InvalidPage(page));
    }
    Ok(())
}

fn base_query(api_key: &str, language: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![("api_key", api_key.to_string())];
    if let Some(language) = language {
        query.push(("language", language.to_string()));
    }
    query
}

/// Fetch one page of `movie/popular` or `movie/top_rated`
pub async fn get_movie_page(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: Option<&str>,
    kind: CatalogKind,
    page: u32,
) -> Result<CatalogPage<Movie>, SourceError> {
    validate_page(page)?;

    let url = format!("{}/movie/{}", base_url.trim_end_matches('/'), kind.path());
    let mut query = base_query(api_key, language);
    query.push(("page", page.to_string()));

    debug!(endpoint = kind.path(), page, "Fetching TMDB movie page");
    let (body, _) = send_json::<CatalogPage<Movie>>("tmdb", client.get(&url).query(&query)).await?;
    debug!(
        endpoint = kind.path(),
        page = body.page,
        results = body.results.len(),
        total_pages = body.total_pages,
        "Fetched TMDB movie page"
    );
    Ok(body)
}

/// Fetch the movie genre list
pub async fn get_genres(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: Option<&str>,
) -> Result<Vec<Genre>, SourceError> {
    let url = format!("{}/genre/movie/list", base_url.trim_end_matches('/'));
    let query = base_query(api_key, language);

    let (body, _) = send_json::<GenreList>("tmdb", client.get(&url).query(&query)).await?;
    debug!(genres = body.genres.len(), "Fetched TMDB genres");
    Ok(body.genres)
}
