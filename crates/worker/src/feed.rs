//! Newline-delimited JSON review feed.
//!
//! Development stand-in for the ingestion pipeline: each non-blank line is one
//! [`ReviewReceived`] envelope.

use revalert_events::ReviewReceived;

/// Parse one feed line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ReviewReceived>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}
