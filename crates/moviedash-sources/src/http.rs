use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::SourceError;

const USER_AGENT: &str = concat!("moviedash/", env!("CARGO_PKG_VERSION"));

pub fn create_client() -> Result<Client, SourceError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()?)
}

/// Send a request and decode a JSON body, turning non-2xx responses into `SourceError::Status`
pub async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<(T, reqwest::header::HeaderMap), SourceError> {
    let response = request.header("Accept", "application/json").send().await?;
    let status = response.status();
    debug!(service, status = %status, "Received response");

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status { service, status, body });
    }

    let headers = response.headers().clone();
    let body = response.json::<T>().await?;
    Ok((body, headers))
}
