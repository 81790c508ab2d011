//! Deadline and panic handling for inbound requests.
//!
//! Both failures become JSON error bodies instead of a dropped connection.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};

/// Tracing target for recovered failures.
const TRACING_TARGET: &str = "gantry_server::middleware::recovery";

/// Inbound request deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may take before it is answered with 504.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)
    )]
    pub request_timeout: u64,
}

impl RecoveryConfig {
    /// Sets the deadline in seconds.
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            request_timeout: secs,
        }
    }

    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::with_timeout_secs(30)
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt<S> {
    /// Enforces the request deadline and turns handler panics into 500s.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        self.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(recover_error))
                .layer(CatchPanicLayer::custom(recover_panic))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
    }
}

async fn recover_error(error: BoxError) -> Error<'static> {
    if error.is::<Elapsed>() {
        tracing::warn!(target: TRACING_TARGET, "Request deadline exceeded");
        return ErrorKind::GatewayTimeout.with_message("Request timed out");
    }

    tracing::error!(
        target: TRACING_TARGET,
        error = %error,
        "Middleware failed"
    );
    ErrorKind::InternalServerError.with_message(format!("Internal error: {error}"))
}

fn recover_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = match (payload.downcast_ref::<String>(), payload.downcast_ref::<&str>()) {
        (Some(message), _) => message.as_str(),
        (None, Some(message)) => message,
        (None, None) => "non-string panic payload",
    };

    tracing::error!(
        target: TRACING_TARGET,
        panic = %message,
        "Handler panicked"
    );

    ErrorKind::InternalServerError
        .with_message("An unexpected panic occurred")
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(3)).await;
        "late"
    }

    async fn boom() -> &'static str {
        panic!("handler exploded")
    }

    fn server() -> anyhow::Result<TestServer> {
        let router: Router = Router::new()
            .route("/slow", get(slow))
            .route("/boom", get(boom))
            .with_recovery(&RecoveryConfig::with_timeout_secs(1));
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn timeout_is_gateway_timeout() -> anyhow::Result<()> {
        let response = server()?.get("/slow").await;
        response.assert_status(StatusCode::GATEWAY_TIMEOUT);

        let body: serde_json::Value = response.json();
        assert_eq!(body["detail"], "Request timed out");
        Ok(())
    }

    #[tokio::test]
    async fn panic_is_internal_error() -> anyhow::Result<()> {
        let response = server()?.get("/boom").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "internal_server_error");
        Ok(())
    }
}
