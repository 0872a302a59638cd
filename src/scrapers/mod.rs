//! HTML scrapers for the lineup source.
//!
//! Scraping follows the same two-phase pattern for every run:
//!
//! 1. **Indexing**: [`overview`] discovers team-page links on the matchday
//!    overview and pairs them into fixtures.
//! 2. **Extraction**: [`lineup`] pulls the probable starting eleven out of a
//!    single team page.
//!
//! Both work on an already-parsed document and never touch the network;
//! fetching lives in [`crate::fetch`] and [`crate::coordinator`].

pub mod lineup;
pub mod overview;
