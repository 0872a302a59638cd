//! Error types for the lineup scraper.
//!
//! Two tiers of failure exist:
//!
//! - [`FetchError`]: one page could not be retrieved. For team pages this is
//!   never fatal; the coordinator turns it into an empty lineup.
//! - [`ScrapeError`]: a failure at one of the run's single points of
//!   dependency (the overview page, the configuration, the output file).
//!   These abort the run and surface as a non-zero exit status.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// A failed page retrieval.
///
/// Every variant carries the URL that was requested so the failure can be
/// logged against the team it belongs to.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs} seconds")]
    Timeout { url: String, timeout_secs: u64 },

    /// The server answered with a non-success status code.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// DNS, connection, TLS or body-read failures.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The URL whose retrieval failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Transport { url, .. } => url,
        }
    }
}

/// A failure that halts the whole run.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The overview page itself could not be fetched.
    #[error("overview page unavailable: {0}")]
    Overview(#[source] FetchError),

    /// The overview page was fetched but contained no team links.
    #[error("no team links found on overview page {url}")]
    NoTeamLinks { url: String },

    /// A configured URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The match list could not be serialized.
    #[error("failed to serialize matches: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output document could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for fallible pipeline stages.
pub type Result<T> = std::result::Result<T, ScrapeError>;
