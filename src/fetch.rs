use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

const SCRAPER_API_ENDPOINT: &str = "http://api.scraperapi.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Failure categories for the rendering-proxy fetch. These never originate
/// from extraction, which is total; only the network edge can fail.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("SCRAPER_API_KEY environment variable must be set")]
    MissingApiKey,
    #[error("request timeout: rendering proxy took too long to respond")]
    Timeout,
    #[error("connection error: could not reach rendering proxy")]
    Connect,
    #[error("rendering proxy returned HTTP {0}")]
    Upstream(u16),
    #[error("access denied or blocked by the target site")]
    Blocked,
    #[error("rendering proxy returned an empty response")]
    EmptyBody,
    #[error("failed to fetch page: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the ScraperAPI rendering proxy. Cheap to share across
/// requests; the inner reqwest client is already reference-counted.
pub struct FetchClient {
    http: reqwest::Client,
    api_key: String,
}

impl FetchClient {
    pub fn from_env() -> Result<Self, FetchError> {
        let api_key = std::env::var("SCRAPER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(FetchError::MissingApiKey)?;
        Self::new(api_key)
    }

    pub fn new(api_key: String) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(FetchClient { http, api_key })
    }

    /// Fetch one URL through the proxy with JavaScript rendering enabled
    /// and return the raw HTML body.
    pub async fn fetch_rendered(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self
            .http
            .get(SCRAPER_API_ENDPOINT)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("url", url),
                ("render", "true"),
            ])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Proxy returned HTTP {} for {}", status, url);
            return Err(FetchError::Upstream(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_transport)?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }
        if looks_blocked(&body) {
            return Err(FetchError::Blocked);
        }

        debug!(
            "Fetched {} bytes for {} in {} ms",
            body.len(),
            url,
            t0.elapsed().as_millis()
        );
        Ok(body)
    }
}

fn classify_transport(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_connect() {
        FetchError::Connect
    } else {
        FetchError::Transport(err)
    }
}

/// The proxy sometimes relays an interstitial instead of failing outright.
fn looks_blocked(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("error") && (lower.contains("access denied") || lower.contains("blocked"))
}
