use super::load_credentials;
use crate::output::Output;
use crate::{ConfigCommands, KeyService};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use moviedash_config::{ApiKey, Config, CredentialStore, PathManager};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, config, paths, output),
        ConfigCommands::SetKey { service, value } => set_key(service.into(), value, paths, output),
        ConfigCommands::Init { force } => init_config(force, paths, output),
    }
}

impl From<KeyService> for ApiKey {
    fn from(service: KeyService) -> Self {
        match service {
            KeyService::Tmdb => ApiKey::Tmdb,
            KeyService::Trakt => ApiKey::TraktClientId,
        }
    }
}

fn show_config(full: bool, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let credentials = load_credentials(paths)?;

    let keys: Vec<(ApiKey, String, &'static str)> = [ApiKey::Tmdb, ApiKey::TraktClientId]
        .into_iter()
        .map(|key| {
            let (value, origin) = key_status(key, &credentials);
            let shown = match value {
                Some(v) if full => v,
                Some(v) => mask_string(&v),
                None => "<not set>".to_string(),
            };
            (key, shown, origin)
        })
        .collect();

    output.json(&json!({
        "config_file": config_file.display().to_string(),
        "config_file_exists": config_file.exists(),
        "credentials_file": paths.credentials_file().display().to_string(),
        "log_dir": paths.log_dir().display().to_string(),
        "config": config,
        "api_keys": keys
            .iter()
            .map(|(key, shown, origin)| json!({ "name": key.store_key(), "value": shown, "source": origin }))
            .collect::<Vec<_>>(),
    }));

    if !output.is_human() || output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}; showing defaults. Run 'moviedash config init' to create it.",
            config_file.display()
        ));
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    let rows: Vec<(&str, String)> = vec![
        ("Config file", config_file.display().to_string()),
        ("tmdb.base_url", config.tmdb.base_url.clone()),
        ("tmdb.language", config.tmdb.language.clone().unwrap_or_else(|| "-".to_string())),
        ("trakt.base_url", config.trakt.base_url.clone()),
        ("trakt.max_pages", config.trakt.max_pages.to_string()),
        ("trakt.page_size", config.trakt.page_size.to_string()),
        ("diary.default_source", config.diary.default_source.as_str().to_string()),
        (
            "diary.default_username",
            config.diary.default_username.clone().unwrap_or_else(|| "-".to_string()),
        ),
        (
            "diary.letterboxd_export",
            config
                .diary
                .letterboxd_export
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("display.chart_width", config.display.chart_width.to_string()),
        ("display.list_limit", config.display.list_limit.to_string()),
        (
            "logging.file",
            config
                .logging
                .file
                .as_deref()
                .map(|p| paths.resolve_log_file(p).display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
        ("Log directory", paths.log_dir().display().to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    for (key, shown, origin) in &keys {
        table.add_row(vec![Cell::new(key.store_key()), Cell::new(format!("{} ({})", shown, origin))]);
    }

    output.println(format!("\n{}", "Configuration".bright_cyan().bold()));
    output.println(table.to_string());
    Ok(())
}

/// Effective key value and where it came from
fn key_status(key: ApiKey, credentials: &CredentialStore) -> (Option<String>, &'static str) {
    let from_env = std::env::var(key.env_var()).ok().filter(|v| !v.trim().is_empty());
    match from_env {
        Some(value) => (Some(value), "environment"),
        None => match credentials.stored_api_key(key) {
            Some(value) => (Some(value.clone()), "credentials file"),
            None => (None, "unset"),
        },
    }
}

fn set_key(key: ApiKey, value: Option<String>, paths: &PathManager, output: &Output) -> Result<()> {
    let value = match value {
        Some(v) => v,
        None => rpassword::prompt_password(format!("Enter {} key: ", key.service()))
            .map_err(|e| eyre!("Failed to read key: {}", e))?,
    };
    let value = value.trim().to_string();
    if value.is_empty() {
        output.error("Key cannot be empty");
        return Err(eyre!("{} key is required", key.service()));
    }

    let mut credentials = load_credentials(paths)?;
    credentials.set_api_key(key, value);
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", paths.credentials_file().display(), e))?;

    tracing::info!(service = key.service(), "Stored API key");
    output.success(format!("Saved {} to {}", key.store_key(), paths.credentials_file().display()));

    if std::env::var(key.env_var()).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        output.warn(format!("{} is set and takes precedence over the stored key", key.env_var()));
    }
    Ok(())
}

fn init_config(force: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", paths.config_dir().display(), e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("0123456789"), "01***89");
        assert_eq!(mask_string(""), "");
    }

    #[test]
    fn test_key_status_reads_stored_value() {
        let mut credentials = CredentialStore::new(PathBuf::from("/nonexistent/credentials.toml"));
        credentials.set_api_key(ApiKey::TraktClientId, "stored".to_string());
        // Only meaningful when the override is not set in the test environment
        if std::env::var(ApiKey::TraktClientId.env_var()).is_err() {
            assert_eq!(
                key_status(ApiKey::TraktClientId, &credentials),
                (Some("stored".to_string()), "credentials file")
            );
        }
    }

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("moviedash"));
        let output = Output::new(crate::output::OutputFormat::Json, true);

        init_config(false, &paths, &output).unwrap();
        let loaded = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(loaded.display.chart_width, 40);
        assert!(paths.log_dir().is_dir());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        let output = Output::new(crate::output::OutputFormat::Json, true);

        let mut custom = Config::default();
        custom.display.chart_width = 12;
        custom.save_to_file(&paths.config_file()).unwrap();

        init_config(false, &paths, &output).unwrap();
        assert_eq!(Config::load_from_file(&paths.config_file()).unwrap().display.chart_width, 12);

        init_config(true, &paths, &output).unwrap();
        assert_eq!(Config::load_from_file(&paths.config_file()).unwrap().display.chart_width, 40);
    }

    #[test]
    fn test_set_key_stores_value() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        let output = Output::new(crate::output::OutputFormat::Json, true);

        set_key(ApiKey::Tmdb, Some("  tmdb-key  ".to_string()), &paths, &output).unwrap();
        let credentials = load_credentials(&paths).unwrap();
        assert_eq!(credentials.stored_api_key(ApiKey::Tmdb), Some(&"tmdb-key".to_string()));
    }

    #[test]
    fn test_set_key_rejects_blank_value() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        let output = Output::new(crate::output::OutputFormat::Json, true);

        assert!(set_key(ApiKey::Tmdb, Some("   ".to_string()), &paths, &output).is_err());
        assert!(!paths.credentials_file().exists());
    }
}
