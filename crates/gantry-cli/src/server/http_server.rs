//! HTTP server startup.

use std::future::{Future, IntoFuture};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;
use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::lifecycle::serve_with_shutdown;
use crate::server::{ServerError, ServerResult, shutdown_signal};

/// Starts an HTTP server with graceful shutdown.
///
/// Once a shutdown signal arrives the listener is closed and in-flight
/// requests are drained for at most the configured shutdown timeout.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %validation_error,
            "Invalid server configuration"
        );

        return Err(ServerError::invalid_config(&validation_error));
    }

    let server_addr = server_config.server_addr();
    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );

        ServerError::bind(server_addr, err)
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "Successfully bound to address"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server bound to all interfaces, ensure firewall rules are configured"
        );
    }

    serve_listener(listener, app, server_config.shutdown_timeout(), shutdown_signal()).await
}

/// Serves on an already bound listener until `signal` resolves and draining
/// completes or times out.
pub(crate) async fn serve_listener<F>(
    listener: TcpListener,
    app: Router,
    shutdown_timeout: Duration,
    signal: F,
) -> ServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let signaled = Arc::new(Notify::new());

    let graceful = {
        let signaled = Arc::clone(&signaled);
        async move {
            signal.await;
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = shutdown_timeout.as_secs(),
                "Graceful shutdown initiated"
            );
            signaled.notify_one();
        }
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .into_future();

    let drain_deadline = async move {
        signaled.notified().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    serve_with_shutdown(async move {
        tokio::select! {
            result = server => result,
            () = drain_deadline => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    timeout_secs = shutdown_timeout.as_secs(),
                    "Shutdown timeout elapsed, dropping in-flight requests"
                );
                Ok::<(), io::Error>(())
            }
        }
    })
    .await
    .map_err(ServerError::Runtime)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use axum::routing::get;
    use tokio::sync::oneshot;

    use super::*;

    async fn bind() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        (listener, url)
    }

    #[tokio::test]
    async fn stops_after_signal() {
        let (listener, _) = bind().await;
        let (tx, rx) = oneshot::channel::<()>();
        let app = Router::new().route("/health", get(|| async { "ok" }));

        let handle = tokio::spawn(serve_listener(
            listener,
            app,
            Duration::from_secs(5),
            async move {
                let _ = rx.await;
            },
        ));

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn drain_is_bounded_by_timeout() {
        let (listener, url) = bind().await;
        let (tx, rx) = oneshot::channel::<()>();
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "done"
            }),
        );

        let handle = tokio::spawn(serve_listener(
            listener,
            app,
            Duration::from_millis(200),
            async move {
                let _ = rx.await;
            },
        ));

        // Open a connection with an in-flight request that never finishes in time.
        let mut stream = tokio::net::TcpStream::connect(url.trim_start_matches("http://"))
            .await
            .unwrap();
        tokio::io::AsyncWriteExt::write_all(
            &mut stream,
            b"GET /slow HTTP/1.1\r\nhost: localhost\r\n\r\n",
        )
        .await
        .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let started_at = Instant::now();
        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
        assert!(started_at.elapsed() < Duration::from_secs(5));
    }
}
