//! Source factories: build data sources from configuration and stored credentials.

use moviedash_config::{ApiKey, Config, CredentialStore, DiarySourceKind};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::{DiarySource, LetterboxdExport, SourceError, TmdbClient, TraktDiary};

/// Per-invocation overrides for diary sources
#[derive(Debug, Clone, Default)]
pub struct DiaryOptions {
    /// Letterboxd export to read instead of `diary.letterboxd_export`
    pub export_path: Option<PathBuf>,
}

/// Factory trait for creating diary sources from configuration
pub trait DiarySourceFactory: Send + Sync {
    fn kind(&self) -> DiarySourceKind;

    fn create_source(
        &self,
        config: &Config,
        credentials: &CredentialStore,
        options: &DiaryOptions,
    ) -> Result<Box<dyn DiarySource>, SourceError>;
}

/// Registry of diary source factories
pub struct DiarySourceRegistry {
    factories: HashMap<DiarySourceKind, Box<dyn DiarySourceFactory>>,
}

impl DiarySourceRegistry {
    /// Create a registry with the built-in factories registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register(Box::new(trakt::TraktDiaryFactory));
        registry.register(Box::new(letterboxd::LetterboxdFactory));

        registry
    }

    pub fn register(&mut self, factory: Box<dyn DiarySourceFactory>) {
        self.factories.insert(factory.kind(), factory);
    }

    pub fn create_source(
        &self,
        kind: DiarySourceKind,
        config: &Config,
        credentials: &CredentialStore,
        options: &DiaryOptions,
    ) -> Result<Box<dyn DiarySource>, SourceError> {
        let factory = self
            .factories
            .get(&kind)
            .ok_or_else(|| SourceError::not_configured("diary", format!("no factory registered for {}", kind.as_str())))?;
        factory.create_source(config, credentials, options)
    }

    pub fn is_registered(&self, kind: DiarySourceKind) -> bool {
        self.factories.contains_key(&kind)
    }
}

impl Default for DiarySourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the TMDB catalog client from the stored (or environment) API key
pub fn create_catalog_source(config: &Config, credentials: &CredentialStore) -> Result<TmdbClient, SourceError> {
    let api_key = credentials.api_key(ApiKey::Tmdb).ok_or_else(|| {
        SourceError::not_configured(
            "tmdb",
            format!(
                "no API key; run `moviedash config set-key tmdb` or set {}",
                ApiKey::Tmdb.env_var()
            ),
        )
    })?;
    TmdbClient::new(api_key, &config.tmdb)
}

mod trakt {
    use super::*;

    pub struct TraktDiaryFactory;

    impl DiarySourceFactory for TraktDiaryFactory {
        fn kind(&self) -> DiarySourceKind {
            DiarySourceKind::Trakt
        }

        fn create_source(
            &self,
            config: &Config,
            credentials: &CredentialStore,
            _options: &DiaryOptions,
        ) -> Result<Box<dyn DiarySource>, SourceError> {
            let client_id = credentials.api_key(ApiKey::TraktClientId).ok_or_else(|| {
                SourceError::not_configured(
                    "trakt",
                    format!(
                        "no client id; run `moviedash config set-key trakt` or set {}",
                        ApiKey::TraktClientId.env_var()
                    ),
                )
            })?;
            Ok(Box::new(TraktDiary::new(client_id, &config.trakt)?))
        }
    }
}

mod letterboxd {
    use super::*;

    pub struct LetterboxdFactory;

    impl DiarySourceFactory for LetterboxdFactory {
        fn kind(&self) -> DiarySourceKind {
            DiarySourceKind::Letterboxd
        }

        fn create_source(
            &self,
            config: &Config,
            _credentials: &CredentialStore,
            options: &DiaryOptions,
        ) -> Result<Box<dyn DiarySource>, SourceError> {
            let path = options
                .export_path
                .clone()
                .or_else(|| config.diary.letterboxd_export.clone())
                .ok_or_else(|| {
                    SourceError::not_configured(
                        "letterboxd",
                        "no export file; pass --file or set diary.letterboxd_export",
                    )
                })?;
            Ok(Box::new(LetterboxdExport::new(path)))
        }
    }
}
