pub mod catalog;
pub mod config;
pub mod diary;
pub mod overview;
pub mod ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use moviedash_config::{CredentialStore, PathManager};

/// Load stored API keys; a missing credentials file yields an empty store
pub fn load_credentials(paths: &PathManager) -> Result<CredentialStore> {
    let path = paths.credentials_file();
    let mut store = CredentialStore::new(path.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", path.display(), e))?;
    Ok(store)
}

/// Most stars drawn for a rating
const MAX_STARS: f64 = 5.0;

/// Display a 0-5 rating as stars, e.g. `★★★½ (3.5)`; zero shows `☆`
pub fn format_stars(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() && r >= 0.0 => {
            let halves = (r.min(MAX_STARS) * 2.0).round() as usize;
            let mut stars = "★".repeat(halves / 2);
            if halves % 2 == 1 {
                stars.push('½');
            }
            if stars.is_empty() {
                stars.push('☆');
            }
            format!("{} ({:.1})", stars, r)
        }
        _ => "-".to_string(),
    }
}
