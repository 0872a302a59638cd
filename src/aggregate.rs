//! Join fixtures with their collected lineups.
//!
//! Output order is the overview's pair order, regardless of the order in
//! which team pages finished downloading.

use crate::coordinator::LineupMap;
use crate::models::{LineupResult, Match, MatchPair, NO_DATA_SENTINEL, Side, TeamRef};
use tracing::{debug, instrument};

/// Build one [`Match`] per pair, in pair order.
///
/// A side without players (fetch failed, no lineup on the page, or no entry
/// in `lineups` at all) gets `[NO_DATA_SENTINEL]`, so every lineup field in
/// the output is non-empty.
#[instrument(level = "info", skip_all, fields(matches = pairs.len()))]
pub fn build_matches(pairs: &[MatchPair], lineups: &LineupMap) -> Vec<Match> {
    pairs
        .iter()
        .map(|pair| {
            let home = lineups.get(&pair.home.url);
            let away = lineups.get(&pair.away.url);
            let built = Match {
                home_team: team_name(pair.team(Side::Home), home),
                away_team: team_name(pair.team(Side::Away), away),
                home_lineup: lineup_or_sentinel(home),
                away_lineup: lineup_or_sentinel(away),
                reference_url: pair.home.url.clone(),
            };
            debug!(home = %built.home_team, away = %built.away_team, "Built match");
            built
        })
        .collect()
}

fn lineup_or_sentinel(result: Option<&LineupResult>) -> Vec<String> {
    match result {
        Some(result) if result.has_players() => result.players.clone(),
        _ => vec![NO_DATA_SENTINEL.to_string()],
    }
}

/// Overview name, or the team page's own name when the overview link had no
/// text.
fn team_name(team: &TeamRef, result: Option<&LineupResult>) -> String {
    if !team.name.is_empty() {
        return team.name.clone();
    }
    result
        .and_then(|r| r.page_team_name.clone())
        .unwrap_or_default()
}
