use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// API keys the dashboard knows how to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiKey {
    Tmdb,
    TraktClientId,
}

impl ApiKey {
    /// Key name inside credentials.toml
    pub fn store_key(&self) -> &'static str {
        match self {
            ApiKey::Tmdb => "tmdb_api_key",
            ApiKey::TraktClientId => "trakt_client_id",
        }
    }

    /// Environment variable that overrides the stored value
    pub fn env_var(&self) -> &'static str {
        match self {
            ApiKey::Tmdb => "MOVIEDASH_TMDB_API_KEY",
            ApiKey::TraktClientId => "MOVIEDASH_TRAKT_CLIENT_ID",
        }
    }

    pub fn service(&self) -> &'static str {
        match self {
            ApiKey::Tmdb => "tmdb",
            ApiKey::TraktClientId => "trakt",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn set_api_key(&mut self, key: ApiKey, value: String) {
        self.set(key.store_key().to_string(), value);
    }

    /// Stored value only, ignoring the environment
    pub fn stored_api_key(&self, key: ApiKey) -> Option<&String> {
        self.get(key.store_key()).filter(|v| !v.trim().is_empty())
    }

    /// Environment variable first, then the stored value
    pub fn api_key(&self, key: ApiKey) -> Option<String> {
        std::env::var(key.env_var())
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.stored_api_key(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_api_key(ApiKey::Tmdb, "tmdb-secret".to_string());
        store.set_api_key(ApiKey::TraktClientId, "trakt-id".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.stored_api_key(ApiKey::Tmdb), Some(&"tmdb-secret".to_string()));
        assert_eq!(loaded_store.get("trakt_client_id"), Some(&"trakt-id".to_string()));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.load().unwrap();
        assert_eq!(store.stored_api_key(ApiKey::Tmdb), None);
    }

    #[test]
    fn test_blank_stored_key_is_ignored() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_api_key(ApiKey::TraktClientId, "   ".to_string());
        assert_eq!(store.stored_api_key(ApiKey::TraktClientId), None);
    }
}
