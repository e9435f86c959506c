// Signal handling module
//
// Supported signals:
// - SIGINT:  Shutdown (Ctrl+C)
// - SIGTERM: Shutdown
//
// On non-Unix targets only Ctrl+C is handled.

use crate::logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Signal handler state
pub struct SignalHandler {
    /// Notified once when shutdown is requested
    pub shutdown: Arc<Notify>,
    /// Whether shutdown has been requested
    pub shutdown_requested: Arc<AtomicBool>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request shutdown: set the flag first, then wake the accept loop.
    pub fn trigger_shutdown(&self, signal_name: &str) {
        logger::log_signal(signal_name);
        self.shutdown_requested.store(true, Ordering::SeqCst);
        self.shutdown.notify_waiters();
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Register interrupt handlers and watch for them in a background task.
///
/// Registration happens before the task is spawned so a failure surfaces
/// at startup; without working handlers the shutdown contract cannot be
/// honored.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => handler.trigger_shutdown("SIGTERM"),
            _ = sigint.recv() => handler.trigger_shutdown("SIGINT (Ctrl+C)"),
        }
    });

    Ok(())
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) -> std::io::Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => handler.trigger_shutdown("Ctrl+C"),
            Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_sets_flag_and_wakes_waiters() {
        let handler = Arc::new(SignalHandler::new());
        assert!(!handler.shutdown_requested.load(Ordering::SeqCst));

        let waiter = Arc::clone(&handler.shutdown);
        let notified = tokio::spawn(async move { waiter.notified().await });

        // Give the waiter a chance to register before notifying
        tokio::task::yield_now().await;
        handler.trigger_shutdown("TEST");

        assert!(handler.shutdown_requested.load(Ordering::SeqCst));
        notified.await.unwrap();
    }
}
