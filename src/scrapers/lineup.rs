//! Probable-lineup extraction from a team page.
//!
//! Team pages carry a "Voraussichtliche Aufstellung" (probable lineup) block
//! somewhere in prose-heavy markup with no stable ids. Extraction is a
//! heuristic:
//!
//! 1. find every text node containing the marker phrase (case-insensitive);
//! 2. climb from each marker to its content region (see
//!    [`crate::dom::enclosing_region`]);
//! 3. read player-profile links (`/vorname-nachname_12345/`) inside that
//!    region, in document order, skipping short and repeated names;
//! 4. stop at eleven names.
//!
//! The first marker whose region yields any name wins. A page without a
//! usable marker yields an empty list, which is an expected outcome.

use crate::dom::{Accept, PageNode, enclosing_region, find_all, find_by_attr, find_text};
use crate::models::LineupResult;
use crate::utils::clean_text;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Size of a starting eleven.
pub const MAX_PLAYERS: usize = 11;

/// Names shorter than this are icons or decoration, not players.
const MIN_NAME_CHARS: usize = 3;

static LINEUP_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)voraussichtliche\s+aufstellung").expect("lineup marker pattern"));

static PLAYER_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/[a-zA-Z0-9-]+_\d+/").expect("player link pattern"));

static NAME_ITEMPROP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^name$").expect("itemprop pattern"));

const BLOCK_CONTAINERS: &[Accept] = &[Accept::Tag("div"), Accept::Tag("section")];
const CONTENT_BOX: &[Accept] = &[Accept::TagClass {
    tag: "div",
    class: "content_box",
}];

/// Extract up to eleven probable starters from a parsed team page.
#[instrument(level = "debug", skip_all)]
pub fn extract_lineup(document: &Html) -> Vec<String> {
    let root = PageNode::root(document);
    let markers = find_text(root, &LINEUP_MARKER);
    debug!(markers = markers.len(), "Lineup markers found");

    for marker in markers {
        let Some(region) = enclosing_region(marker, BLOCK_CONTAINERS, CONTENT_BOX) else {
            continue;
        };

        let players = players_in(region);
        if !players.is_empty() {
            debug!(count = players.len(), ?players, "Lineup extracted");
            return players;
        }
    }

    Vec::new()
}

/// Unique player names linked from `region`, capped at [`MAX_PLAYERS`].
fn players_in(region: PageNode<'_>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut players = Vec::with_capacity(MAX_PLAYERS);

    for link in find_by_attr(region, "a", "href", &PLAYER_HREF) {
        let name = clean_text(&link.text());
        if name.chars().count() < MIN_NAME_CHARS || !seen.insert(name.clone()) {
            continue;
        }
        players.push(name);
        if players.len() == MAX_PLAYERS {
            break;
        }
    }

    players
}

/// Team name as printed on the team page: the `itemprop="name"` heading,
/// else the `<title>` up to the first `|`.
pub fn page_team_name(document: &Html) -> Option<String> {
    let root = PageNode::root(document);

    let heading = find_by_attr(root, "h2", "itemprop", &NAME_ITEMPROP)
        .first()
        .map(|h2| clean_text(&h2.text()))
        .filter(|name| !name.is_empty());

    heading.or_else(|| {
        find_all(root, |node| node.tag() == Some("title"))
            .first()
            .and_then(|title| {
                let text = title.text();
                let name = clean_text(text.split('|').next().unwrap_or_default());
                (!name.is_empty()).then_some(name)
            })
    })
}

/// Parse a team page body and run every extraction on it.
pub fn parse_team_page(body: &str) -> LineupResult {
    let document = Html::parse_document(body);
    LineupResult {
        players: extract_lineup(&document),
        page_team_name: page_team_name(&document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_link(name: &str, id: u32) -> String {
        let slug = name.to_lowercase().replace(' ', "-");
        format!(r#"<a href="/{slug}_{id}/">{name}</a>"#)
    }

    fn team_page(lineup_links: &str) -> String {
        format!(
            r#"<html><head><title>FC Muster | Ligainsider</title></head><body>
            <div class="content_box">
                <div class="headline"><h2>VORAUSSICHTLICHE AUFSTELLUNG</h2></div>
                <div class="formation">{lineup_links}</div>
            </div>
            <div class="content_box"><h2>News</h2>{}</div>
            </body></html>"#,
            player_link("Not A Starter", 999)
        )
    }

    #[test]
    fn test_fourteen_links_with_three_duplicates_yield_eleven() {
        let names = [
            "Manuel Tor", "Anton Abwehr", "Bernd Abwehr", "Anton Abwehr", "Carl Abwehr",
            "Dieter Abwehr", "Emil Mitte", "Bernd Abwehr", "Fritz Mitte", "Gustav Mitte",
            "Emil Mitte", "Heinz Mitte", "Ingo Sturm", "Jonas Sturm",
        ];
        assert_eq!(names.len(), 14);
        let links: String = names
            .iter()
            .enumerate()
            .map(|(i, n)| player_link(n, 100 + i as u32))
            .collect();

        let players = extract_lineup(&Html::parse_document(&team_page(&links)));

        assert_eq!(
            players,
            vec![
                "Manuel Tor", "Anton Abwehr", "Bernd Abwehr", "Carl Abwehr", "Dieter Abwehr",
                "Emil Mitte", "Fritz Mitte", "Gustav Mitte", "Heinz Mitte", "Ingo Sturm",
                "Jonas Sturm",
            ]
        );
    }

    #[test]
    fn test_caps_at_eleven() {
        let links: String = (0..20).map(|i| player_link(&format!("Spieler Nummer{i}"), i)).collect();
        let players = extract_lineup(&Html::parse_document(&team_page(&links)));
        assert_eq!(players.len(), MAX_PLAYERS);
        assert_eq!(players[0], "Spieler Nummer0");
        assert_eq!(players[10], "Spieler Nummer10");
    }

    #[test]
    fn test_no_marker_yields_empty() {
        let html = format!(
            "<html><body><div class=\"content_box\">{}</div></body></html>",
            player_link("Max Mustermann", 1)
        );
        assert!(extract_lineup(&Html::parse_document(&html)).is_empty());
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let html = format!(
            "<div class=\"content_box\"><p>Voraussichtliche Aufstellung</p>{}</div>",
            player_link("Max Mustermann", 1)
        );
        assert_eq!(extract_lineup(&Html::parse_document(&html)), vec!["Max Mustermann"]);
    }

    #[test]
    fn test_short_names_and_non_player_links_are_skipped() {
        let links = format!(
            r#"<a href="/x_1/">⚽</a><a href="/ab_2/">Ab</a><a href="/news/">Some News</a>{}"#,
            player_link("Max Mustermann", 3)
        );
        let players = extract_lineup(&Html::parse_document(&team_page(&links)));
        assert_eq!(players, vec!["Max Mustermann"]);
    }

    #[test]
    fn test_first_productive_marker_wins() {
        let html = format!(
            r#"<html><body>
            <div class="content_box"><div><h3>Voraussichtliche Aufstellung</h3></div><p>folgt</p></div>
            <div class="content_box"><div><h3>Voraussichtliche Aufstellung</h3></div>{}{}</div>
            <div class="content_box"><div><h3>Voraussichtliche Aufstellung</h3></div>{}</div>
            </body></html>"#,
            player_link("Erster Spieler", 1),
            player_link("Zweiter Spieler", 2),
            player_link("Dritter Spieler", 3),
        );
        let players = extract_lineup(&Html::parse_document(&html));
        assert_eq!(players, vec!["Erster Spieler", "Zweiter Spieler"]);
    }

    #[test]
    fn test_links_outside_region_are_ignored() {
        let html = team_page(&player_link("Max Mustermann", 1));
        let players = extract_lineup(&Html::parse_document(&html));
        assert_eq!(players, vec!["Max Mustermann"]);
    }

    #[test]
    fn test_page_team_name_prefers_itemprop_heading() {
        let html = r#"<html><head><title>Title Name | Site</title></head>
            <body><h2 itemprop="name"> Heading
                Name </h2></body></html>"#;
        assert_eq!(page_team_name(&Html::parse_document(html)).as_deref(), Some("Heading Name"));
    }

    #[test]
    fn test_page_team_name_falls_back_to_title() {
        let html = team_page("");
        assert_eq!(page_team_name(&Html::parse_document(&html)).as_deref(), Some("FC Muster"));
    }

    #[test]
    fn test_parse_team_page_without_anything() {
        let result = parse_team_page("not really html");
        assert!(result.players.is_empty());
        assert!(result.page_team_name.is_none());
    }
}
