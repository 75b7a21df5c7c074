pub mod parser;

use async_trait::async_trait;
use moviedash_models::WatchedEntry;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::traits::DiarySource;
use crate::SourceError;

/// Diary read from a Letterboxd `diary.csv` export on disk
#[derive(Debug, Clone)]
pub struct LetterboxdExport {
    path: PathBuf,
}

impl LetterboxdExport {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DiarySource for LetterboxdExport {
    fn source_name(&self) -> &str {
        "letterboxd"
    }

    async fn fetch_diary(&self, username: &str) -> Result<Vec<WatchedEntry>, SourceError> {
        let content = tokio::fs::read(&self.path).await?;
        let entries = parser::parse_diary_csv(content.as_slice())?;
        info!(
            source = "letterboxd",
            username,
            path = %self.path.display(),
            entries = entries.len(),
            "Fetched diary"
        );
        Ok(entries)
    }
}
