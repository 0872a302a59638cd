//! Bounded concurrent fetch-and-extract over every team page.
//!
//! Each distinct team URL becomes one task: fetch the page, parse it, extract
//! the lineup. At most `concurrency` tasks are in flight at once. A task
//! never fails: fetch errors and unusable pages both come back as an empty
//! [`LineupResult`].
//!
//! Every task returns its own `(url, result)` slot; the slots are merged into
//! the URL-keyed map only after all tasks have finished. URLs are
//! deduplicated before scheduling, so no two tasks can produce the same key.

use crate::fetch::PageSource;
use crate::models::{LineupResult, MatchPair, Side};
use crate::scrapers::lineup::parse_team_page;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Lineup results keyed by team URL.
pub type LineupMap = HashMap<String, LineupResult>;

/// Every team URL referenced by `pairs`, home before away, first occurrence
/// kept.
pub fn distinct_team_urls(pairs: &[MatchPair]) -> Vec<String> {
    pairs
        .iter()
        .flat_map(|pair| [Side::Home, Side::Away].map(|side| pair.team(side).url.clone()))
        .unique()
        .collect()
}

/// Fetch and extract a single team page. Never fails.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn lineup_for<S: PageSource>(source: &S, url: &str, timeout: Duration) -> LineupResult {
    let page = match source.fetch_page(url, timeout).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "Team page fetch failed; no lineup for this team");
            return LineupResult::empty();
        }
    };
    debug!(status = %page.status, bytes = page.body.len(), "Parsing team page");

    let result = parse_team_page(&page.body);
    if result.has_players() {
        info!(players = result.players.len(), "Extracted lineup");
    } else {
        warn!("No probable lineup found on team page");
    }
    result
}

/// Run one fetch+extract task per distinct team URL, at most `concurrency` at
/// a time, and collect the results by URL.
///
/// The returned map covers every URL referenced by `pairs`.
#[instrument(level = "info", skip_all, fields(matches = pairs.len(), concurrency = concurrency))]
pub async fn collect_lineups<S: PageSource>(
    source: &S,
    pairs: &[MatchPair],
    concurrency: usize,
    timeout: Duration,
) -> LineupMap {
    let urls = distinct_team_urls(pairs);
    let total = urls.len();
    info!(teams = total, "Fetching team pages");

    let slots: Vec<(String, LineupResult)> = stream::iter(urls)
        .map(|url| async move {
            let result = lineup_for(source, &url, timeout).await;
            (url, result)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let lineups: LineupMap = slots.into_iter().collect();
    let with_data = lineups.values().filter(|r| r.has_players()).count();
    info!(
        teams = total,
        with_lineup = with_data,
        without_lineup = total - with_data,
        "Completed team page fetching"
    );
    lineups
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::FetchedPage;
    use crate::models::TeamRef;
    use reqwest::StatusCode;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory [`PageSource`]: known URLs return their body, anything else
    /// times out. Tracks request counts and peak concurrency.
    #[derive(Default)]
    pub(crate) struct FixturePages {
        pages: HashMap<String, String>,
        delay: Duration,
        in_flight: AtomicUsize,
        pub(crate) peak: AtomicUsize,
        pub(crate) requests: Mutex<Vec<String>>,
    }

    impl FixturePages {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
            self.pages.insert(url.to_string(), body.into());
            self
        }

        pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl PageSource for FixturePages {
        async fn fetch_page(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.pages.get(url) {
                Some(body) => Ok(FetchedPage {
                    status: StatusCode::OK,
                    body: body.clone(),
                }),
                None => Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout_secs: timeout.as_secs(),
                }),
            }
        }
    }

    pub(crate) fn lineup_page(names: &[&str]) -> String {
        let links: String = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let slug = name.to_lowercase().replace(' ', "-");
                format!(r#"<a href="/{slug}_{i}/">{name}</a>"#)
            })
            .collect();
        format!(
            r#"<html><body><div class="content_box"><h2>VORAUSSICHTLICHE AUFSTELLUNG</h2>{links}</div></body></html>"#
        )
    }

    fn pair(home: &str, away: &str) -> MatchPair {
        MatchPair {
            home: TeamRef { name: home.into(), url: format!("https://e.com/{home}") },
            away: TeamRef { name: away.into(), url: format!("https://e.com/{away}") },
        }
    }

    #[test]
    fn test_distinct_urls_keep_first_occurrence_order() {
        let pairs = vec![pair("a", "b"), pair("c", "a"), pair("b", "d")];
        assert_eq!(
            distinct_team_urls(&pairs),
            vec!["https://e.com/a", "https://e.com/b", "https://e.com/c", "https://e.com/d"]
        );
    }

    #[tokio::test]
    async fn test_each_distinct_url_fetched_once() {
        let source = FixturePages::new()
            .with_page("https://e.com/a", lineup_page(&["Anton Alpha"]))
            .with_page("https://e.com/b", lineup_page(&["Bernd Beta"]));
        let pairs = vec![pair("a", "b"), pair("b", "a")];

        let lineups = collect_lineups(&source, &pairs, 10, Duration::from_secs(1)).await;

        assert_eq!(lineups.len(), 2);
        assert_eq!(lineups["https://e.com/a"].players, vec!["Anton Alpha"]);
        assert_eq!(source.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_empty_result() {
        let source = FixturePages::new().with_page("https://e.com/a", lineup_page(&["Anton Alpha"]));
        let lineups = collect_lineups(&source, &[pair("a", "gone")], 10, Duration::from_secs(1)).await;

        assert!(lineups["https://e.com/a"].has_players());
        assert!(!lineups["https://e.com/gone"].has_players());
    }

    #[tokio::test]
    async fn test_in_flight_tasks_never_exceed_limit() {
        let pairs: Vec<MatchPair> = (0..15).map(|i| pair(&format!("h{i}"), &format!("a{i}"))).collect();
        let source = FixturePages::new().with_delay(Duration::from_millis(20));

        let lineups = collect_lineups(&source, &pairs, 10, Duration::from_secs(1)).await;

        assert_eq!(lineups.len(), 30);
        let peak = source.peak.load(Ordering::SeqCst);
        assert!(peak <= 10, "peak concurrency {peak}");
        assert!(peak > 1, "tasks should overlap");
    }
}
