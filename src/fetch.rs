//! Page retrieval over HTTP.
//!
//! The pipeline only depends on the [`PageSource`] trait. [`HttpFetcher`] is
//! the production implementation: one `reqwest::Client` with a browser-like
//! header set, shared by every request of a run.

use crate::error::FetchError;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// User-Agent of a common desktop browser; basic bot filters let it through.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36";

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "de-DE,de;q=0.9,en-US;q=0.8,en;q=0.7";

/// A successfully retrieved page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub body: String,
}

/// Something that can retrieve a page by URL.
pub trait PageSource {
    /// GET `url` with the given timeout.
    ///
    /// Non-success statuses are errors, never pages.
    async fn fetch_page(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError>;
}

/// [`PageSource`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher that sends `user_agent` plus fixed Accept headers on
    /// every request.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(user_agent) {
            Ok(value) => {
                headers.insert(USER_AGENT, value);
            }
            Err(e) => warn!(error = %e, "Configured User-Agent is not a valid header; sending none"),
        }
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_page(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        let transport = |source: reqwest::Error| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout_secs: timeout.as_secs(),
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    source,
                }
            }
        };

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(%status, bytes = body.len(), "Fetched page");
        Ok(FetchedPage { status, body })
    }
}
