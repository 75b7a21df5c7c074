use chrono::{DateTime, Utc};
use moviedash_models::WatchedEntry;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::http::send_json;
use crate::SourceError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktIds {
    pub trakt: Option<u64>,
    pub slug: Option<String>,
    pub imdb: Option<String>,
    pub tmdb: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktMovie {
    pub title: String,
    pub year: Option<i32>,
    pub ids: TraktIds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktHistoryItem {
    pub watched_at: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub movie: Option<TraktMovie>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktRatingItem {
    pub rated_at: Option<String>,
    pub rating: u8,
    #[serde(rename = "type")]
    pub item_type: String,
    pub movie: Option<TraktMovie>,
}

/// Trakt rates 1-10; diary entries use a 0-5 star scale
pub fn normalize_trakt_rating(rating: u8) -> Option<f64> {
    if (1..=10).contains(&rating) {
        Some(f64::from(rating) / 2.0)
    } else {
        None
    }
}

fn request(client: &Client, url: &str, client_id: &str) -> reqwest::RequestBuilder {
    client
        .get(url)
        .header("trakt-api-version", "2")
        .header("trakt-api-key", client_id)
        .header("Content-Type", "application/json")
}

/// Fetch a user's public movie watch history, following pagination
pub async fn get_movie_history(
    client: &Client,
    base_url: &str,
    client_id: &str,
    username: &str,
    page_size: u32,
    max_pages: u32,
) -> Result<Vec<TraktHistoryItem>, SourceError> {
    let encoded_username = urlencoding::encode(username);
    let mut all_items = Vec::new();
    let mut page = 1;

    loop {
        let url = format!(
            "{}/users/{}/history/movies?page={}&limit={}",
            base_url.trim_end_matches('/'),
            encoded_username,
            page,
            page_size
        );

        let (items, headers) =
            send_json::<Vec<TraktHistoryItem>>("trakt", request(client, &url, client_id)).await?;

        let total_pages: u32 = headers
            .get("X-Pagination-Page-Count")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let items_on_page = items.len();
        debug!(page, total_pages, items_on_page, "Fetched Trakt history page");
        all_items.extend(items);

        if page >= total_pages || items_on_page < page_size as usize {
            break;
        }
        if page >= max_pages {
            warn!(
                max_pages,
                total_pages, "Trakt history has more pages than trakt.max_pages, stopping early"
            );
            break;
        }
        page += 1;
    }

    Ok(all_items)
}

/// Fetch a user's public movie ratings
pub async fn get_movie_ratings(
    client: &Client,
    base_url: &str,
    client_id: &str,
    username: &str,
) -> Result<Vec<TraktRatingItem>, SourceError> {
    let url = format!(
        "{}/users/{}/ratings/movies",
        base_url.trim_end_matches('/'),
        urlencoding::encode(username)
    );
    let (items, _) = send_json::<Vec<TraktRatingItem>>("trakt", request(client, &url, client_id)).await?;
    debug!(ratings = items.len(), "Fetched Trakt ratings");
    Ok(items)
}

/// Join watch history with ratings into diary entries.
///
/// Ratings are matched by Trakt id. History items without movie data or with
/// an unparsable `watched_at` are skipped.
pub fn history_to_entries(history: Vec<TraktHistoryItem>, ratings: &[TraktRatingItem]) -> Vec<WatchedEntry> {
    let ratings_by_id: HashMap<u64, u8> = ratings
        .iter()
        .filter(|r| r.item_type == "movie")
        .filter_map(|r| r.movie.as_ref().and_then(|m| m.ids.trakt).map(|id| (id, r.rating)))
        .collect();

    let mut entries = Vec::with_capacity(history.len());
    let mut skipped = 0usize;

    for item in history {
        if item.item_type != "movie" {
            continue;
        }
        let Some(movie) = item.movie else {
            skipped += 1;
            continue;
        };

        let watched_at = match DateTime::parse_from_rfc3339(&item.watched_at) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => {
                debug!(title = %movie.title, watched_at = %item.watched_at, error = %e, "Skipping history item with invalid date");
                skipped += 1;
                continue;
            }
        };

        let rating = movie
            .ids
            .trakt
            .and_then(|id| ratings_by_id.get(&id).copied())
            .and_then(normalize_trakt_rating);
        let link = movie.ids.slug.as_ref().map(|slug| format!("https://trakt.tv/movies/{}", slug));

        entries.push(
            WatchedEntry::new(movie.title, watched_at)
                .with_year(movie.year)
                .with_rating(rating)
                .with_link(link),
        );
    }

    if skipped > 0 {
        warn!(skipped, "Skipped Trakt history items that could not be converted");
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY_JSON: &str = r#"[
        {"id": 1, "watched_at": "2024-01-05T20:00:00.000Z", "action": "watch", "type": "movie",
         "movie": {"title": "Inception", "year": 2010, "ids": {"trakt": 16662, "slug": "inception-2010", "imdb": "tt1375666", "tmdb": 27205}}},
        {"id": 2, "watched_at": "2024-01-06T20:00:00.000Z", "action": "watch", "type": "movie",
         "movie": {"title": "Unknown Year", "year": null, "ids": {"trakt": 99, "slug": null, "imdb": null, "tmdb": null}}},
        {"id": 3, "watched_at": "not a date", "action": "watch", "type": "movie",
         "movie": {"title": "Broken", "year": 2001, "ids": {"trakt": 5, "slug": "broken", "imdb": null, "tmdb": null}}}
    ]"#;

    const RATINGS_JSON: &str = r#"[
        {"rated_at": "2024-01-05T22:00:00.000Z", "rating": 8, "type": "movie",
         "movie": {"title": "Inception", "year": 2010, "ids": {"trakt": 16662, "slug": "inception-2010", "imdb": "tt1375666", "tmdb": 27205}}}
    ]"#;

    #[test]
    fn test_normalize_trakt_rating() {
        assert_eq!(normalize_trakt_rating(8), Some(4.0));
        assert_eq!(normalize_trakt_rating(1), Some(0.5));
        assert_eq!(normalize_trakt_rating(10), Some(5.0));
        assert_eq!(normalize_trakt_rating(0), None);
        assert_eq!(normalize_trakt_rating(11), None);
    }

    #[test]
    fn test_history_to_entries_joins_ratings() {
        let history: Vec<TraktHistoryItem> = serde_json::from_str(HISTORY_JSON).unwrap();
        let ratings: Vec<TraktRatingItem> = serde_json::from_str(RATINGS_JSON).unwrap();

        let entries = history_to_entries(history, &ratings);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].title, "Inception");
        assert_eq!(entries[0].year, Some(2010));
        assert_eq!(entries[0].rating, Some(4.0));
        assert_eq!(entries[0].link.as_deref(), Some("https://trakt.tv/movies/inception-2010"));

        assert_eq!(entries[1].title, "Unknown Year");
        assert_eq!(entries[1].year, None);
        assert_eq!(entries[1].rating, None);
        assert_eq!(entries[1].link, None);
    }

    #[test]
    fn test_history_to_entries_without_ratings() {
        let history: Vec<TraktHistoryItem> = serde_json::from_str(HISTORY_JSON).unwrap();
        let entries = history_to_entries(history, &[]);
        assert!(entries.iter().all(|e| e.rating.is_none()));
    }

    #[test]
    fn test_empty_history() {
        assert!(history_to_entries(Vec::new(), &[]).is_empty());
    }
}
