//! Stops the dispatcher when the process is asked to terminate.

use std::future::Future;

use teloxide::dispatching::ShutdownToken;
use tokio::signal::unix::{SignalKind, signal};

/// Resolves on the next SIGTERM. The handler is installed before this returns,
/// so a signal sent right after the call is not lost.
pub fn sigterm() -> std::io::Result<impl Future<Output = ()>> {
    let mut term = signal(SignalKind::terminate())?;
    Ok(async move {
        term.recv().await;
    })
}

/// Waits for `signal` and then shuts the dispatcher down gracefully.
pub async fn stop_on(signal: impl Future<Output = ()>, token: ShutdownToken) {
    signal.await;
    tracing::info!("Termination requested, shutting down");
    match token.shutdown() {
        Ok(done) => done.await,
        Err(e) => tracing::warn!("Dispatcher was not running: {e:?}"),
    }
}
