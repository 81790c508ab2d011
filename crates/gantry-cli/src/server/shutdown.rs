//! Process signals that start a graceful shutdown.

use std::fmt;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Signal that ended the serving phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    /// `SIGINT`, usually Ctrl+C in a terminal.
    Interrupt,
    /// `SIGTERM`, sent by orchestrators before killing the process.
    Terminate,
}

impl fmt::Display for StopSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("SIGINT"),
            Self::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Resolves once `SIGINT` or `SIGTERM` is delivered.
///
/// A handler that cannot be installed is logged and never fires, so the other
/// one still works.
pub async fn shutdown_signal() {
    let signal = tokio::select! {
        () = interrupt() => StopSignal::Interrupt,
        () = terminate() => StopSignal::Terminate,
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = %signal,
        "Shutdown signal received"
    );
}

async fn interrupt() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {}
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                signal = %StopSignal::Interrupt,
                "Cannot listen for signal"
            );
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                signal = %StopSignal::Terminate,
                "Cannot listen for signal"
            );
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
