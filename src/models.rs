//! Data models flowing through the lineup pipeline.
//!
//! Each stage produces one of these values and hands it to the next stage
//! without mutating anything an earlier stage built:
//!
//! - [`TeamRef`]: a team link discovered on the overview page
//! - [`MatchPair`]: two consecutive team links, home then away
//! - [`LineupResult`]: what one team page yielded
//! - [`Match`]: the unit written to the output document
//!
//! [`Match`] uses camelCase field names to match the published JSON schema.

use serde::{Deserialize, Serialize};

/// Placeholder lineup entry for a side that produced no data.
pub const NO_DATA_SENTINEL: &str = "Keine Daten";

/// A team reference discovered on the overview page.
///
/// `url` is always absolute; `name` is whitespace-normalized and may be empty
/// when the anchor carried no visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    /// Visible team name.
    pub name: String,
    /// Absolute URL of the team's match page.
    pub url: String,
}

/// Which side of a fixture a team plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Two consecutive overview links forming one fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPair {
    pub home: TeamRef,
    pub away: TeamRef,
}

impl MatchPair {
    /// The team playing on `side`.
    pub fn team(&self, side: Side) -> &TeamRef {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// The outcome of fetching and parsing one team page.
///
/// An empty `players` list means either the fetch failed or the page held no
/// recognizable lineup; downstream stages treat both the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineupResult {
    /// Up to eleven player names in document order.
    pub players: Vec<String>,
    /// Team name as printed on the team page itself, if found.
    pub page_team_name: Option<String>,
}

impl LineupResult {
    /// A result for a team page that could not be used.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_players(&self) -> bool {
        !self.players.is_empty()
    }
}

/// A fixture with both probable lineups, as written to the output file.
///
/// # JSON Schema
///
/// ```json
/// {
///     "homeTeam": "FC Muster",
///     "awayTeam": "SV Beispiel",
///     "homeLineup": ["..."],
///     "awayLineup": ["Keine Daten"],
///     "url": "https://www.ligainsider.de/bundesliga/team/..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub home_team: String,
    pub away_team: String,
    /// One to eleven entries; `[NO_DATA_SENTINEL]` when nothing was found.
    pub home_lineup: Vec<String>,
    pub away_lineup: Vec<String>,
    /// The home team's page, kept for traceability.
    #[serde(rename = "url")]
    pub reference_url: String,
}
