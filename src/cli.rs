//! Command-line interface definitions.
//!
//! Every flag is optional. Without any, the scraper reads the default
//! Bundesliga overview and writes `ligainsider_lineups.json` next to the
//! executable. Flags override values from the YAML config file.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the lineup scraper.
///
/// # Examples
///
/// ```sh
/// # Defaults
/// ligainsider_lineups
///
/// # Custom output location and a config file
/// ligainsider_lineups --config ./scraper.yaml --output /tmp/lineups.json
/// ```
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Matchday overview page to start from
    #[arg(long, env = "LIGAINSIDER_OVERVIEW_URL")]
    pub overview_url: Option<String>,

    /// Output file (default: next to the executable)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of team pages fetched at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Timeout for each team page request, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_without_arguments() {
        let cli = Cli::parse_from(["ligainsider_lineups"]);
        assert!(cli.config.is_none());
        assert!(cli.output.is_none());
        assert!(cli.concurrency.is_none());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "ligainsider_lineups",
            "--overview-url",
            "https://example.com/spieltage/",
            "--output",
            "/tmp/out.json",
            "--concurrency",
            "4",
            "--timeout-secs",
            "20",
        ]);

        assert_eq!(cli.overview_url.as_deref(), Some("https://example.com/spieltage/"));
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/out.json")));
        assert_eq!(cli.concurrency, Some(4));
        assert_eq!(cli.timeout_secs, Some(20));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["ligainsider_lineups", "-c", "conf.yaml", "-o", "out.json"]);

        assert_eq!(cli.config, Some(PathBuf::from("conf.yaml")));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }
}
