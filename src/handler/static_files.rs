//! Static file serving module
//!
//! Path decoding and resolution against the served root, file loading,
//! and response assembly with conditional and Range support.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// Where a request path landed inside the served root
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    /// Serve this file
    File(PathBuf),
    /// Render a listing for this directory
    Directory(PathBuf),
    /// Directory hit without a trailing slash: redirect to `<path>/`
    Redirect,
    /// Nothing servable at this path
    NotFound,
}

/// Decode `%xx` escapes in a request path.
///
/// Returns None for truncated or non-hex escapes, for embedded NUL, and
/// for byte sequences that are not valid UTF-8. Callers treat all of
/// those as absent resources rather than errors.
pub fn percent_decode(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            out.push(hi << 4 | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    if out.contains(&0) {
        return None;
    }
    String::from_utf8(out).ok()
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Resolve a decoded request path to a file or directory under `root`.
///
/// `root` must already be canonical. Canonicalization of the joined path
/// is the traversal authority: whatever survives `..` rejection and
/// symlink resolution must still live under `root`.
pub fn resolve_request_path(root: &Path, request_path: &str, index_files: &[String]) -> Resolved {
    let relative = request_path.trim_start_matches('/');

    // Reject dot-dot segments before touching the filesystem
    if Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        logger::log_warning(&format!("Rejected parent-dir component in: {request_path}"));
        return Resolved::NotFound;
    }

    let joined = root.join(relative);
    let Ok(canonical) = joined.canonicalize() else {
        // Missing file, ordinary 404
        return Resolved::NotFound;
    };
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return Resolved::NotFound;
    }

    if canonical.is_dir() {
        if !request_path.ends_with('/') {
            return Resolved::Redirect;
        }
        for index in index_files {
            let candidate = canonical.join(index);
            if candidate.is_file() {
                return Resolved::File(candidate);
            }
        }
        return Resolved::Directory(canonical);
    }

    Resolved::File(canonical)
}

/// Load file content, its content type, and its modification time
pub async fn load_file(path: &Path) -> Option<(Vec<u8>, &'static str, Option<SystemTime>)> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return None;
        }
    };
    let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
    let modified = fs::metadata(path).await.ok().and_then(|m| m.modified().ok());
    Some((content, content_type, modified))
}

/// Serve a resolved file
pub async fn serve_file(ctx: &RequestContext<'_>, path: &Path, server: &str) -> Response<Full<Bytes>> {
    match load_file(path).await {
        Some((content, content_type, modified)) => {
            respond_with_file(ctx, content, content_type, modified, server)
        }
        None => http::build_404_response(server),
    }
}

/// Assemble the response for loaded file content: conditional requests
/// first, then Range handling, then the full representation.
pub fn respond_with_file(
    ctx: &RequestContext<'_>,
    content: Vec<u8>,
    content_type: &'static str,
    modified: Option<SystemTime>,
    server: &str,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&content);
    let last_modified = modified.map(cache::format_http_date);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag, server);
    }
    // If-Modified-Since only counts when no entity validator was sent
    if ctx.if_none_match.is_none() {
        if let Some(ref lm) = last_modified {
            if cache::check_modified_since(ctx.if_modified_since.as_deref(), lm) {
                return http::build_304_response(&etag, server);
            }
        }
    }

    let total_size = content.len();
    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Satisfiable(range) => {
            let start = range.start;
            let end = range.end_position(total_size);
            let body = Bytes::from(content[start..=end].to_vec());
            http::build_partial_response(
                body,
                content_type,
                &etag,
                start,
                end,
                total_size,
                server,
                ctx.is_head,
            )
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size, server),
        RangeOutcome::Ignored => http::build_file_response(
            Bytes::from(content),
            content_type,
            &etag,
            last_modified.as_deref(),
            server,
            ctx.is_head,
        ),
    }
}
