pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, ConfigError, DiaryConfig, DiarySourceKind, DisplayConfig, LoggingConfig, TmdbConfig, TraktConfig};
pub use credentials::{CredentialStore, ApiKey};
pub use paths::{PathManager, config_dir_override};
