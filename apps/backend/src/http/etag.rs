//! ETag helpers for game reads.

use crate::domain::GameId;

/// Format: `"game-{id}-v{version}"` (quoted, per RFC 9110)
pub fn game_etag(id: &GameId, version: u64) -> String {
    format!(r#""game-{id}-v{version}""#)
}

/// Whether an `If-None-Match` header value matches `etag`. Handles the
/// wildcard and comma-separated lists.
pub fn if_none_match_hits(header: &str, etag: &str) -> bool {
    let header = header.trim();
    header == "*"
        || header
            .split(',')
            .map(str::trim)
            .map(|candidate| candidate.strip_prefix("W/").unwrap_or(candidate))
            .any(|candidate| candidate == etag)
}
