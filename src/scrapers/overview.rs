//! Matchday overview parser.
//!
//! The overview page lists every fixture of the current round. Each fixture
//! links to both teams' pages with URLs like
//! `/bundesliga/team/fc-muster/saison-2025-2026/`; home is always linked
//! before away. Pairing is therefore purely positional: links are taken two
//! at a time in document order.

use crate::dom::{PageNode, find_by_attr};
use crate::models::{MatchPair, TeamRef};
use crate::utils::{clean_text, collapse_doubled_name};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::{debug, info, instrument, warn};
use url::Url;

static TEAM_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/bundesliga/team/.*/saison-").expect("team link pattern"));

/// Collect every team link on the overview page in document order.
///
/// Relative addresses are resolved against `base`. Links whose address cannot
/// be resolved are skipped with a warning.
#[instrument(level = "debug", skip_all, fields(%base))]
pub fn discover_team_links(document: &Html, base: &Url) -> Vec<TeamRef> {
    let anchors = find_by_attr(PageNode::root(document), "a", "href", &TEAM_HREF);

    anchors
        .iter()
        .filter_map(|anchor| {
            let href = anchor.attr("href")?;
            match base.join(href) {
                Ok(resolved) => Some(TeamRef {
                    name: collapse_doubled_name(&clean_text(&anchor.text())),
                    url: resolved.to_string(),
                }),
                Err(e) => {
                    warn!(%href, error = %e, "Skipping unresolvable team link");
                    None
                }
            }
        })
        .collect()
}

/// Group team links into fixtures: first of each pair is home, second away.
///
/// A trailing unpaired link is dropped.
pub fn pair_teams(teams: Vec<TeamRef>) -> Vec<MatchPair> {
    if teams.len() % 2 == 1 {
        if let Some(last) = teams.last() {
            warn!(url = %last.url, "Dropping unpaired trailing team link");
        }
    }

    teams
        .chunks_exact(2)
        .map(|pair| MatchPair {
            home: pair[0].clone(),
            away: pair[1].clone(),
        })
        .collect()
}

/// Parse the overview document into ordered fixtures.
///
/// # Returns
///
/// The discovered pairs (possibly empty) together with the raw number of team
/// links, so the caller can tell "no links at all" from "one stray link".
#[instrument(level = "info", skip_all, fields(%base))]
pub fn parse_overview(document: &Html, base: &Url) -> (Vec<MatchPair>, usize) {
    let teams = discover_team_links(document, base);
    let link_count = teams.len();
    debug!(teams = ?teams.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), "Team links");

    let pairs = pair_teams(teams);
    info!(links = link_count, matches = pairs.len(), "Parsed overview page");
    (pairs, link_count)
}
