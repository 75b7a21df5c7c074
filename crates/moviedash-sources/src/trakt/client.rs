use async_trait::async_trait;
use moviedash_config::TraktConfig;
use moviedash_models::WatchedEntry;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use crate::http::create_client;
use crate::trakt::api;
use crate::traits::DiarySource;
use crate::SourceError;

/// Public Trakt watch history for any user, read with an API client id
#[derive(Clone)]
pub struct TraktDiary {
    client: Arc<Client>,
    base_url: String,
    client_id: String,
    page_size: u32,
    max_pages: u32,
}

impl TraktDiary {
    pub fn new(client_id: String, config: &TraktConfig) -> Result<Self, SourceError> {
        if client_id.trim().is_empty() {
            return Err(SourceError::not_configured("trakt", "client id is empty"));
        }
        Ok(Self {
            client: Arc::new(create_client()?),
            base_url: config.base_url.clone(),
            client_id,
            page_size: config.page_size.max(1),
            max_pages: config.max_pages.max(1),
        })
    }
}

#[async_trait]
impl DiarySource for TraktDiary {
    fn source_name(&self) -> &str {
        "trakt"
    }

    async fn fetch_diary(&self, username: &str) -> Result<Vec<WatchedEntry>, SourceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SourceError::InvalidQuery("username cannot be empty".to_string()));
        }

        let history = api::get_movie_history(
            &self.client,
            &self.base_url,
            &self.client_id,
            username,
            self.page_size,
            self.max_pages,
        )
        .await?;
        let ratings = api::get_movie_ratings(&self.client, &self.base_url, &self.client_id, username).await?;

        let entries = api::history_to_entries(history, &ratings);
        info!(source = "trakt", username, entries = entries.len(), "Fetched diary");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_client_id_is_not_configured() {
        let result = TraktDiary::new(String::new(), &TraktConfig::default());
        assert!(matches!(result, Err(SourceError::NotConfigured { service: "trakt", .. })));
    }

    #[tokio::test]
    async fn test_blank_username_is_rejected() {
        let diary = TraktDiary::new("client".to_string(), &TraktConfig::default()).unwrap();
        let result = diary.fetch_diary("   ").await;
        assert!(matches!(result, Err(SourceError::InvalidQuery(_))));
    }
}
