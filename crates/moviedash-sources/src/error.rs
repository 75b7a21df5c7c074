use reqwest::StatusCode;
use thiserror::Error;

/// Failure while talking to a data source.
///
/// Every source maps its failures into this enum so callers can surface a
/// single kind of fetch error to the user.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{service} is not configured: {reason}")]
    NotConfigured { service: &'static str, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("page {0} is out of range (expected 1-{max})", max = crate::tmdb::api::MAX_PAGE)]
    InvalidPage(u32),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parse(String),
}

impl SourceError {
    pub fn not_configured(service: &'static str, reason: impl Into<String>) -> Self {
        Self::NotConfigured {
            service,
            reason: reason.into(),
        }
    }
}
