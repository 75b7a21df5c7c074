use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub trakt: TraktConfig,
    #[serde(default)]
    pub diary: DiaryConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0}.base_url cannot be empty")]
    EmptyBaseUrl(&'static str),
    #[error("display.chart_width must be greater than zero")]
    ZeroChartWidth,
    #[error("trakt.max_pages must be greater than zero")]
    ZeroMaxPages,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    /// Optional `language` query parameter (e.g. "en-US")
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TraktConfig {
    #[serde(default = "default_trakt_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiarySourceKind {
    #[default]
    Trakt,
    Letterboxd,
}

impl DiarySourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiarySourceKind::Trakt => "trakt",
            DiarySourceKind::Letterboxd => "letterboxd",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DiaryConfig {
    #[serde(default)]
    pub default_source: DiarySourceKind,
    #[serde(default)]
    pub default_username: Option<String>,
    /// Path to a Letterboxd `diary.csv` export
    #[serde(default)]
    pub letterboxd_export: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr; relative
    /// paths are placed in the `logs` directory next to the config
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_trakt_base_url() -> String {
    "https://api.trakt.tv".to_string()
}

fn default_max_pages() -> u32 {
    10
}

fn default_page_size() -> u32 {
    100
}

fn default_chart_width() -> usize {
    40
}

fn default_list_limit() -> usize {
    25
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
            language: None,
        }
    }
}

impl Default for TraktConfig {
    fn default() -> Self {
        Self {
            base_url: default_trakt_base_url(),
            max_pages: default_max_pages(),
            page_size: default_page_size(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            chart_width: default_chart_width(),
            list_limit: default_list_limit(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tmdb.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl("tmdb"));
        }
        if self.trakt.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl("trakt"));
        }
        if self.trakt.max_pages == 0 {
            return Err(ConfigError::ZeroMaxPages);
        }
        if self.display.chart_width == 0 {
            return Err(ConfigError::ZeroChartWidth);
        }
        Ok(())
    }
}
