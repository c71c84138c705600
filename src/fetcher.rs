use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] url::ParseError),
    #[error("HTTP {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Fetcher { client }
    }

    /// One GET, no retries. 2xx returns the body text; anything else is an
    /// error for the caller to propagate.
    pub fn fetch(&self, url: &str, params: &[(&str, String)]) -> Result<String, ScrapeError> {
        let resp = self.client.get(url).query(params).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(resp.text()?)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Fetcher::new()
    }
}
