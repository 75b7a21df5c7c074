use async_trait::async_trait;
use moviedash_config::TmdbConfig;
use moviedash_models::{CatalogKind, CatalogPage, Genre, Movie};
use reqwest::Client;
use std::sync::Arc;

use crate::http::create_client;
use crate::tmdb::api;
use crate::traits::CatalogSource;
use crate::SourceError;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    language: Option<String>,
}

impl TmdbClient {
    pub fn new(api_key: String, config: &TmdbConfig) -> Result<Self, SourceError> {
        if api_key.trim().is_empty() {
            return Err(SourceError::not_configured("tmdb", "API key is empty"));
        }
        Ok(Self {
            client: Arc::new(create_client()?),
            base_url: config.base_url.clone(),
            api_key,
            language: config.language.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn movies(&self, kind: CatalogKind, page: u32) -> Result<CatalogPage<Movie>, SourceError> {
        api::get_movie_page(
            &self.client,
            &self.base_url,
            &self.api_key,
            self.language.as_deref(),
            kind,
            page,
        )
        .await
    }

    async fn genres(&self) -> Result<Vec<Genre>, SourceError> {
        api::get_genres(&self.client, &self.base_url, &self.api_key, self.language.as_deref()).await
    }
}
