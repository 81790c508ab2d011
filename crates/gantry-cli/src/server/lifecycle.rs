//! Logging around the serving phase.

use std::future::Future;
use std::io;
use std::time::Instant;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;
use crate::TRACING_TARGET_SERVER_STARTUP;

/// Awaits `server` and reports how long it ran and how it ended.
pub async fn serve_with_shutdown<F>(server: F) -> io::Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    let serving_since = Instant::now();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        "Accepting connections"
    );

    let result = server.await;
    let uptime = serving_since.elapsed();

    match &result {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_secs = uptime.as_secs(),
                "Server stopped"
            );
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                uptime_secs = uptime.as_secs(),
                "Server stopped with error"
            );
        }
    }

    result
}
