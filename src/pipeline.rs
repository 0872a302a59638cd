//! End-to-end lineup run.
//!
//! 1. **Overview**: fetch and parse the matchday page into fixtures (fatal on
//!    failure)
//! 2. **Team pages**: fetch and extract every team's lineup concurrently
//!    (per-team failures degrade to "no data")
//! 3. **Aggregation**: rebuild fixtures in overview order
//! 4. **Output**: write the JSON document (fatal on failure)

use crate::aggregate::build_matches;
use crate::config::Config;
use crate::coordinator::collect_lineups;
use crate::error::{Result, ScrapeError};
use crate::fetch::PageSource;
use crate::outputs::json::write_matches;
use crate::scrapers::overview::parse_overview;
use crate::utils::truncate_for_log;
use scraper::Html;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub matches: usize,
    pub teams: usize,
    pub teams_with_lineup: usize,
    pub output_path: PathBuf,
}

/// Run the whole pipeline against `source` and write the document.
#[instrument(level = "info", skip_all, fields(overview = %config.overview_url))]
pub async fn run<S: PageSource>(config: &Config, source: &S) -> Result<RunSummary> {
    let base = config.overview_base()?;
    let output_path = config.output_path()?;

    // ---- Overview ----
    let overview = source
        .fetch_page(base.as_str(), config.overview_timeout())
        .await
        .map_err(|e| {
            error!(url = e.url(), error = %e, "Overview page fetch failed");
            ScrapeError::Overview(e)
        })?;

    let (pairs, link_count) = {
        let document = Html::parse_document(&overview.body);
        parse_overview(&document, &base)
    };
    if link_count == 0 {
        error!(
            body_preview = %truncate_for_log(&overview.body, 200),
            "No team links on overview page"
        );
        return Err(ScrapeError::NoTeamLinks {
            url: base.to_string(),
        });
    }
    if pairs.is_empty() {
        warn!(links = link_count, "Team links found but no complete fixture");
    }

    // ---- Team pages ----
    let lineups = collect_lineups(source, &pairs, config.concurrency, config.team_timeout()).await;

    // ---- Aggregation + output ----
    let matches = build_matches(&pairs, &lineups);
    write_matches(&matches, &output_path).await?;

    let summary = RunSummary {
        matches: matches.len(),
        teams: lineups.len(),
        teams_with_lineup: lineups.values().filter(|r| r.has_players()).count(),
        output_path,
    };
    info!(
        matches = summary.matches,
        teams = summary.teams,
        teams_with_lineup = summary.teams_with_lineup,
        path = %summary.output_path.display(),
        "Lineup run finished"
    );
    Ok(summary)
}
