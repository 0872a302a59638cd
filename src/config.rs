//! Run configuration.
//!
//! Values are layered, lowest precedence first:
//!
//! 1. built-in defaults (the constants below),
//! 2. an optional YAML file,
//! 3. command-line flags.
//!
//! The merged [`Config`] is validated before any request is made.
//!
//! ```yaml
//! overview_url: https://www.ligainsider.de/bundesliga/spieltage/
//! output_file: /var/lib/lineups/ligainsider_lineups.json
//! concurrency: 10
//! timeout_secs: 10
//! ```

use crate::cli::Cli;
use crate::error::{Result, ScrapeError};
use crate::fetch::BROWSER_USER_AGENT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Matchday overview of the current Bundesliga round.
pub const DEFAULT_OVERVIEW_URL: &str = "https://www.ligainsider.de/bundesliga/spieltage/";
/// File name of the output document, placed next to the executable.
pub const DEFAULT_OUTPUT_FILE: &str = "ligainsider_lineups.json";
/// Team pages fetched at once.
pub const DEFAULT_CONCURRENCY: usize = 10;
/// Per-request timeout for team pages.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Timeout for the overview page.
pub const DEFAULT_OVERVIEW_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub overview_url: String,
    /// Explicit output path; `None` means next to the executable.
    pub output_file: Option<PathBuf>,
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub overview_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overview_url: DEFAULT_OVERVIEW_URL.to_string(),
            output_file: None,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            overview_timeout_secs: DEFAULT_OVERVIEW_TIMEOUT_SECS,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Parse a YAML document; missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| ScrapeError::Config(e.to_string()))
    }

    /// Read and parse a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ScrapeError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_yaml(&text)?;
        info!("Loaded configuration file");
        Ok(config)
    }

    /// Defaults, then the `--config` file if given, then the remaining flags.
    pub async fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path).await?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Overlay every flag that was given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.overview_url {
            self.overview_url = url.clone();
        }
        if let Some(output) = &cli.output {
            self.output_file = Some(output.clone());
        }
        if let Some(concurrency) = cli.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(timeout) = cli.timeout_secs {
            self.timeout_secs = timeout;
        }
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let url = self.overview_base()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScrapeError::Config(format!(
                "overview URL must be http(s), got {}",
                self.overview_url
            )));
        }
        if self.concurrency == 0 {
            return Err(ScrapeError::Config("concurrency must be at least 1".into()));
        }
        if self.timeout_secs == 0 || self.overview_timeout_secs == 0 {
            return Err(ScrapeError::Config("timeouts must be at least 1 second".into()));
        }
        Ok(())
    }

    /// The overview URL, parsed; also the base for resolving team links.
    pub fn overview_base(&self) -> Result<Url> {
        Url::parse(&self.overview_url).map_err(|source| ScrapeError::InvalidUrl {
            url: self.overview_url.clone(),
            source,
        })
    }

    pub fn team_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn overview_timeout(&self) -> Duration {
        Duration::from_secs(self.overview_timeout_secs)
    }

    /// Where the output document goes: the configured path, or
    /// [`DEFAULT_OUTPUT_FILE`] in the executable's directory.
    pub fn output_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.output_file {
            return Ok(path.clone());
        }
        let exe = std::env::current_exe()
            .map_err(|e| ScrapeError::Config(format!("cannot locate executable: {e}")))?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(dir.join(DEFAULT_OUTPUT_FILE))
    }
}
