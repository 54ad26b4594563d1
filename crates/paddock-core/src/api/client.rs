//! HTTP client for the public results site.
//!
//! `ResultsClient` fetches season overview pages and per-event results pages
//! and turns them into schedules and raw rows. It implements both
//! `ScheduleProvider` and `RowExtractor`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, warn};

use super::html;
use super::FetchError;
use crate::models::{RawRow, SeasonSchedule};
use crate::source::{RowExtractor, ScheduleProvider};

// ============================================================================
// Constants
// ============================================================================

/// Default base URL for results pages
pub const DEFAULT_BASE_URL: &str = "https://www.formula1.com/en/results";

/// HTTP request timeout in seconds.
/// 30s allows for slow page renders while failing fast enough for a refresh cycle.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

const USER_AGENT: &str = concat!("paddock/", env!("CARGO_PKG_VERSION"));

/// Results site client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ResultsClient {
    client: Client,
    base_url: String,
}

impl ResultsClient {
    /// Create a client for the given base URL (no trailing slash needed)
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a season's overview page
    pub fn season_url(&self, year: u16) -> String {
        format!("{}/{}/races", self.base_url, year)
    }

    /// URL of an event page. References may be absolute URLs, host-relative
    /// paths, or paths relative to the season.
    pub fn event_url(&self, year: u16, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_string()
        } else if reference.starts_with('/') {
            format!("{}{}", self.origin(), reference)
        } else {
            format!("{}/{}/{}", self.base_url, year, reference)
        }
    }

    /// Scheme and host of the base URL
    fn origin(&self) -> &str {
        let after_scheme = self.base_url.find("://").map(|i| i + 3).unwrap_or(0);
        match self.base_url[after_scheme..].find('/') {
            Some(slash) => &self.base_url[..after_scheme + slash],
            None => &self.base_url,
        }
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        url: &str,
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>, FetchError> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(FetchError::from_status(status, url, &body))
        }
    }

    /// GET a page as text, backing off on rate limits
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(url)
                .header(header::ACCEPT, "text/html")
                .send()
                .await?;

            match Self::check_response_for_retry(url, response).await? {
                Some(response) => return Ok(response.text().await?),
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(FetchError::RateLimited);
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2; // Exponential backoff
                }
            }
        }
    }
}

#[async_trait]
impl ScheduleProvider for ResultsClient {
    async fn fetch_schedule(&self, year: u16) -> Result<SeasonSchedule, FetchError> {
        let url = self.season_url(year);
        let page = self.get_text(&url).await?;
        let events = html::parse_schedule(&page);
        if events.is_empty() {
            return Err(FetchError::NoTable(url));
        }
        debug!(year, events = events.len(), "Schedule fetched");
        Ok(SeasonSchedule::new(year, events))
    }
}

#[async_trait]
impl RowExtractor for ResultsClient {
    async fn fetch_rows(&self, year: u16, reference: &str) -> Result<Vec<RawRow>, FetchError> {
        let url = self.event_url(year, reference);
        let page = self.get_text(&url).await?;
        Ok(html::parse_results(&page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ResultsClient {
        ResultsClient::new("https://example.com/en/results/").unwrap()
    }

    #[test]
    fn test_season_url() {
        assert_eq!(client().season_url(2024), "https://example.com/en/results/2024/races");
    }

    #[test]
    fn test_event_url_variants() {
        let c = client();
        assert_eq!(
            c.event_url(2024, "races/1229/bahrain/race-result"),
            "https://example.com/en/results/2024/races/1229/bahrain/race-result"
        );
        assert_eq!(
            c.event_url(2024, "/en/results/2024/races/1229/bahrain/race-result"),
            "https://example.com/en/results/2024/races/1229/bahrain/race-result"
        );
        assert_eq!(
            c.event_url(2024, "https://other.example/x"),
            "https://other.example/x"
        );
    }
}
