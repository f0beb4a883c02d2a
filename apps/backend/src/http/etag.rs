//! ETag helpers for polling clients.
//!
//! A session's ETag changes exactly when its snapshot version does, so a
//! client polling `GET /api/sessions/{id}` with `If-None-Match` gets a 304
//! until something happens.

/// Generate the ETag for a session snapshot.
///
/// Format: `"session-{id}-v{version}"` (quoted, as HTTP requires).
///
/// # Example
/// ```
/// # use mafia_backend::http::etag::session_etag;
/// assert_eq!(session_etag("K7Q2MX", 3), r#""session-K7Q2MX-v3""#);
/// ```
pub fn session_etag(id: &str, version: i32) -> String {
    format!(r#""session-{id}-v{version}""#)
}

/// Whether an `If-None-Match` header value matches `etag`.
///
/// Handles the `*` wildcard and comma-separated lists. Comparison is weak
/// (RFC 9110 §13.1.2), so a `W/` prefix on either side is ignored.
pub fn if_none_match_matches(header: &str, etag: &str) -> bool {
    let header = header.trim();
    if header == "*" {
        return true;
    }
    let ours = strip_weak(etag);
    header
        .split(',')
        .map(str::trim)
        .any(|candidate| strip_weak(candidate) == ours)
}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}
