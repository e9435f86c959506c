//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! decoding, resolution against the served root, and access logging.

use crate::config::AppState;
use crate::handler::{listing, static_files};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context carried through resolution and response assembly
pub struct RequestContext<'a> {
    /// Path as received on the wire, used for redirects and logging
    pub raw_path: &'a str,
    /// Percent-decoded path used for filesystem resolution
    pub path: String,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let raw_path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;
    let server = state.config.http.server_name.as_str();

    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(&method, req.uri(), req.version());
    }
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let response = if let Some(resp) = check_http_method(&method, server) {
        resp
    } else if let Some(decoded) = static_files::percent_decode(&raw_path) {
        let ctx = RequestContext {
            raw_path: &raw_path,
            path: decoded,
            is_head,
            if_none_match: header_string(&req, "if-none-match"),
            if_modified_since: header_string(&req, "if-modified-since"),
            range_header: header_string(&req, "range"),
        };
        route_request(&ctx, &state).await
    } else {
        // Undecodable escapes are treated as an absent resource
        http::build_404_response(server)
    };

    if access_log {
        let mut entry = logger::AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            raw_path.clone(),
        );
        entry.status = response.status().as_u16();
        entry.body_bytes = logged_body_bytes(&response, is_head);
        logger::log_access(&entry);
    }

    Ok(response)
}

/// Check HTTP method, returning an early response for non-GET/HEAD
fn check_http_method(method: &Method, server: &str) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(server)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response(server))
        }
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Body bytes for the access log line
fn logged_body_bytes(response: &Response<Full<Bytes>>, is_head: bool) -> usize {
    if is_head
        || response.status() == StatusCode::NOT_MODIFIED
        || response.status() == StatusCode::NO_CONTENT
    {
        return 0;
    }
    response
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Route a validated request to a file, a listing, or an error response
async fn route_request(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let server = state.config.http.server_name.as_str();

    match static_files::resolve_request_path(
        &state.root,
        &ctx.path,
        &state.config.files.index_files,
    ) {
        static_files::Resolved::File(path) => static_files::serve_file(ctx, &path, server).await,
        static_files::Resolved::Redirect => {
            http::build_redirect_response(&format!("{}/", ctx.raw_path), server)
        }
        static_files::Resolved::Directory(dir) => {
            if state.config.files.directory_listing {
                match listing::render_directory(&dir, &ctx.path).await {
                    Ok(html) => http::build_html_response(html, server, ctx.is_head),
                    Err(e) => {
                        logger::log_error(&format!(
                            "Failed to list directory '{}': {e}",
                            dir.display()
                        ));
                        http::build_404_response(server)
                    }
                }
            } else {
                http::build_404_response(server)
            }
        }
        static_files::Resolved::NotFound => http::build_404_response(server),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_head_pass_method_check() {
        assert!(check_http_method(&Method::GET, "s").is_none());
        assert!(check_http_method(&Method::HEAD, "s").is_none());
    }

    #[test]
    fn options_gets_204_with_allow() {
        let resp = check_http_method(&Method::OPTIONS, "s").unwrap();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn mutating_methods_get_405() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let resp = check_http_method(&method, "s").unwrap();
            assert_eq!(resp.status(), 405);
        }
    }
}
