// Browser launch module
// Opening the browser is a best-effort side effect: a missing or broken
// desktop environment must never stop the server from serving.

use crate::logger;

/// Point the default web browser at `url`.
///
/// Failure is swallowed apart from a warning line; the accept loop is
/// already responsible for the real work by the time this runs.
pub fn open_at(url: &str) {
    if let Err(e) = open::that(url) {
        logger::log_warning(&format!("Could not open browser at {url}: {e}"));
    }
}
