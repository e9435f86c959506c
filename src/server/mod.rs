// Server module entry point
// Wires configuration, listener, signals, browser launch, and the accept
// loop into the process lifecycle: Starting -> Serving -> Stopped.

pub mod connection;
pub mod listener;
pub mod signal;

// loop is a keyword; the file keeps the name while the module cannot
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::bind_listener;
pub use server_loop::run_accept_loop;

use crate::browser;
use crate::config::{AppState, Config};
use crate::logger;
use signal::SignalHandler;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How long in-flight connections get to finish after the loop stops
const DRAIN_TIMEOUT: Duration = Duration::from_secs(3);

/// Run the server to completion.
///
/// In order: bind the listener (fatal on failure), announce the URL,
/// open the browser (best-effort), serve until interrupted, then release
/// the listener and drain in-flight connections. Exits cleanly only via
/// the interrupt path.
pub async fn run(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(cfg)?);
    let addr = state.config.socket_addr()?;

    // Bind failure propagates; nothing below runs without the port
    let listener = bind_listener(addr)?;

    let signals = Arc::new(SignalHandler::new());
    signal::start_signal_handler(Arc::clone(&signals))?;

    logger::log_server_start(&state.config, &state.root);

    if state.config.browser.open_on_start {
        browser::open_at(&state.config.display_url());
    }

    let active_connections = Arc::new(AtomicUsize::new(0));
    run_accept_loop(
        listener,
        Arc::clone(&state),
        Arc::clone(&active_connections),
        Arc::clone(&signals),
    )
    .await;

    drain_connections(&active_connections).await;
    logger::log_server_stop();

    Ok(())
}

/// Wait for in-flight connections after the accept loop has stopped,
/// bounded by `DRAIN_TIMEOUT`.
async fn drain_connections(active_connections: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;

    while active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "{} connection(s) still active after {}s drain, closing anyway",
                active_connections.load(Ordering::SeqCst),
                DRAIN_TIMEOUT.as_secs()
            ));
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
