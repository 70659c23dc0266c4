//! Show API HTTP client.
//!
//! Provides async methods for querying the Fox Village show pages.
//! Requests are issued one at a time by the caller; the client itself only
//! enforces a per-request timeout.

use std::time::Duration;

use tracing::{debug, info};

use super::ShowSource;
use super::error::FetchError;
use super::payload::Payload;

/// Default base URL for the show API.
const DEFAULT_BASE_URL: &str = "https://www.foxvillage.com/show";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the show client.
#[derive(Debug, Clone)]
pub struct ShowClientConfig {
    /// Base URL for the API (defaults to production Fox Village)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ShowClientConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ShowClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Show API client.
#[derive(Debug, Clone)]
pub struct ShowClient {
    http: reqwest::Client,
    base_url: String,
}

impl ShowClient {
    /// Create a new show client with the given configuration.
    pub fn new(config: ShowClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// URL of the roster endpoint. `cache_buster` defeats intermediate caches.
    pub fn roster_url(&self, show_id: u64, cache_buster: i64) -> String {
        format!("{}/GetRiderData?id={show_id}&_={cache_buster}", self.base_url)
    }

    /// URL of the class list endpoint.
    pub fn classes_url(&self, show_id: u64) -> String {
        format!("{}/GetClassData?id={show_id}", self.base_url)
    }

    /// URL of a rider's schedule endpoint.
    pub fn rider_schedule_url(&self, show_id: u64, rider_id: i64) -> String {
        format!(
            "{}/GetAllRiderData?show={show_id}&id={rider_id}",
            self.base_url
        )
    }

    /// GET `url` and classify the body.
    ///
    /// A body that is not valid JSON is returned as [`Payload::Text`]
    /// rather than as an error.
    pub async fn fetch_json(&self, url: &str) -> Result<Payload, FetchError> {
        info!(url, "fetching");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        let payload = Payload::from_body(body);

        if let Payload::Text(text) = &payload {
            debug!(url, len = text.len(), "response body is not JSON");
        }

        Ok(payload)
    }
}

impl ShowSource for ShowClient {
    async fn roster(&self, show_id: u64) -> Result<Payload, FetchError> {
        let url = self.roster_url(show_id, chrono::Utc::now().timestamp_millis());
        self.fetch_json(&url).await
    }

    async fn classes(&self, show_id: u64) -> Result<Payload, FetchError> {
        self.fetch_json(&self.classes_url(show_id)).await
    }

    async fn rider_schedule(&self, show_id: u64, rider_id: i64) -> Result<Payload, FetchError> {
        self.fetch_json(&self.rider_schedule_url(show_id, rider_id))
            .await
    }
}
