use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Outcome of a failed outbound GET
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status. `message` is the
    /// `message` field of its JSON body, when there was one.
    #[error("HTTP error: {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Request timed out")]
    Timeout,

    /// Connection-level failure. The URL is stripped so query credentials
    /// never reach logs.
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.without_url())
        }
    }
}

/// Thin JSON-over-HTTP client with a per-request timeout and no retries
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    /// GET `url` with `query` appended and decode the JSON body.
    ///
    /// `query` is skipped from the span: it may carry credentials.
    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let full_url = with_query(url, query);
        let response = tokio::time::timeout(self.timeout, self.client.get(full_url).send())
            .await
            .map_err(|_| FetchError::Timeout)??;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Request returned non-success status");
            // An unreadable error body still keeps the upstream status
            let message = response
                .text()
                .await
                .ok()
                .as_deref()
                .and_then(extract_message);
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let json: T = serde_json::from_str(&text)?;
        info!(url = %url, "Request successful");

        Ok(json)
    }
}

fn with_query(url: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let pairs: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, pairs.join("&"))
}

/// Pull a non-empty string `message` out of a JSON error body
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
