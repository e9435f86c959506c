//! HTTP conditional request module
//!
//! `ETag` generation, `If-None-Match` matching, and `Last-Modified` /
//! `If-Modified-Since` handling for static files.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// Generate a quoted `ETag` from file content using fast hashing
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check the client's `If-None-Match` header against the server `ETag`
///
/// Supports a single `ETag`, a comma-separated list, and the `*` wildcard.
/// Returns true when the client copy is current (respond 304).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Format a filesystem timestamp as an RFC 7231 IMF-fixdate
///
/// # Examples
/// ```
/// use quickserve::http::cache::format_http_date;
/// use std::time::SystemTime;
/// let date = format_http_date(SystemTime::UNIX_EPOCH);
/// assert_eq!(date, "Thu, 01 Jan 1970 00:00:00 GMT");
/// ```
pub fn format_http_date(time: SystemTime) -> String {
    let utc: DateTime<Utc> = time.into();
    utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Check `If-Modified-Since` against the resource's `Last-Modified` value.
///
/// Exact string comparison, the same shortcut nginx takes in its default
/// mode. Only consulted when the request carries no `If-None-Match`.
pub fn check_modified_since(if_modified_since: Option<&str>, last_modified: &str) -> bool {
    if_modified_since.is_some_and(|client_date| client_date.trim() == last_modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn etag_is_quoted_and_stable() {
        let etag = generate_etag(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert_eq!(etag, generate_etag(b"hello world"));
        assert_ne!(etag, generate_etag(b"hello worlds"));
    }

    #[test]
    fn etag_matching() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn http_date_format() {
        let t = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(format_http_date(t), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn modified_since_is_exact_match() {
        let lm = "Sun, 06 Nov 1994 08:49:37 GMT";
        assert!(check_modified_since(Some(lm), lm));
        assert!(check_modified_since(Some(" Sun, 06 Nov 1994 08:49:37 GMT "), lm));
        assert!(!check_modified_since(
            Some("Mon, 07 Nov 1994 08:49:37 GMT"),
            lm
        ));
        assert!(!check_modified_since(None, lm));
    }
}
