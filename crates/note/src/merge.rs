//! Private-section extraction.
//!
//! The preserved region starts at the first line containing the marker and
//! runs to the end of the file. It is returned verbatim — no trimming, no
//! newline normalization — so that re-syncing any number of times leaves
//! the user's text byte-identical.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::Path;
use tokio::fs;

/// Marker line separating the generated region from the user-owned one.
///
/// Changing this after notes exist orphans every previously preserved
/// section: the old marker is no longer recognized, so the next
/// regeneration replaces the whole file. Documented limitation.
pub const DEFAULT_MARKER: &str = "<!-- PRIVATE -->";

/// The placeholder preserved section used for brand-new notes, so every
/// note always contains a marker: a blank line, the marker line, and a
/// trailing blank line.
pub fn default_preserved(marker: &str) -> String {
    format!("\n{marker}\n\n")
}

/// Extract the preserved section from an existing note.
///
/// Returns the first line containing the marker plus everything after it.
/// The match is by substring, so a marker sitting mid-line still counts
/// and its full line is kept. A missing file or a file without a marker
/// yields [`default_preserved`] — never an error. Content above the marker
/// is discarded; it is about to be regenerated anyway.
///
/// A file that exists but carries no marker is treated as fully generated,
/// which loses whatever is in it. Accepted risk for files that predate
/// this tool; guessing a boundary would be worse.
pub async fn extract_preserved(path: impl AsRef<Path>, marker: &str) -> Result<String> {
    let content = match fs::read_to_string(path.as_ref()).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(default_preserved(marker)),
        Err(e) => return Err(e).or_raise(|| ErrorKind::Io),
    };
    Ok(split_at_marker(&content, marker).map_or_else(|| default_preserved(marker), str::to_string))
}

/// Slice from the start of the first line containing `marker` to the end.
fn split_at_marker<'a>(content: &'a str, marker: &str) -> Option<&'a str> {
    let index = content.find(marker)?;
    let line_start = content[..index].rfind('\n').map_or(0, |i| i + 1);
    Some(&content[line_start..])
}
