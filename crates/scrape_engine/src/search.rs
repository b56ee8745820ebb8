use std::time::Duration;

use serde::{Deserialize, Serialize};
use scrape_logging::scrape_info;

#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Base URL of the searx instance, e.g. `http://localhost:8080`.
    pub endpoint: String,
    pub request_timeout: Duration,
    /// Extra query parameters forwarded verbatim, e.g. `("safesearch", "0")`.
    pub extra_params: Vec<(String, String)>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            request_timeout: Duration::from_secs(30),
            extra_params: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(String),
    #[error("search endpoint returned http status {0}")]
    HttpStatus(u16),
    #[error("malformed search response: {0}")]
    InvalidResponse(String),
}

/// One entry of the searx `results` array. Only `url` is required; the rest
/// of the metadata is carried through to the persisted output when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Thin client for a searx-compatible meta-search endpoint. It neither
/// validates nor ranks the returned URLs.
#[derive(Debug, Clone)]
pub struct SearchClient {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl SearchClient {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::Request(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        scrape_info!("starting search for query: {query}");

        let response = self
            .client
            .get(&self.settings.endpoint)
            .query(&[("q", query), ("format", "json")])
            .query(&self.settings.extra_params)
            .send()
            .await
            .map_err(|err| SearchError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SearchError::Request(err.to_string()))?;
        let parsed: SearchResponse = serde_json::from_slice(&body)
            .map_err(|err| SearchError::InvalidResponse(err.to_string()))?;

        scrape_info!(
            "search completed successfully, received {} results",
            parsed.results.len()
        );
        Ok(parsed)
    }
}
