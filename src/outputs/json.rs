//! JSON output for the lineup document.
//!
//! The document is a pretty-printed JSON array (four-space indentation) of
//! [`Match`] objects in fixture order. Non-ASCII characters such as umlauts
//! are written literally, not escaped.
//!
//! # Atomic replacement
//!
//! The document is first written to a `.tmp` sibling and then renamed over
//! the target, so a failed run never leaves a half-written file behind.

use crate::error::{Result, ScrapeError};
use crate::models::Match;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize matches exactly as they are written to disk.
pub fn render_matches(matches: &[Match]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    matches.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write `matches` to `path`, replacing any previous document.
///
/// # Arguments
///
/// * `matches` - Matches in fixture order
/// * `path` - Target file; its parent directory is created if missing
///
/// # Returns
///
/// `Ok(())` once the document is in place, or [`ScrapeError::Write`] naming
/// the path that failed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_matches(matches: &[Match], path: &Path) -> Result<()> {
    let bytes = render_matches(matches)?;
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ScrapeError::Write { path, source }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(write_err(parent))?;
    }

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, &bytes).await {
        error!(tmp = %tmp.display(), error = %e, "Failed to write temporary output");
        return Err(write_err(&tmp)(e));
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(write_err(path)(e));
    }

    info!(matches = matches.len(), bytes = bytes.len(), "Wrote lineup JSON");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
