//! Translation of internal errors into HTTP errors.
//!
//! This is the only place an internal error kind becomes a status code.

use axum::http::StatusCode;
use gantry_core::ErrorKind as CoreErrorKind;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for error conversions.
const TRACING_TARGET: &str = "gantry_server::handler::error";

impl From<gantry_core::Error> for HttpError<'static> {
    fn from(error: gantry_core::Error) -> Self {
        match error.kind {
            CoreErrorKind::NotFound | CoreErrorKind::Upstream => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = error.kind_str(),
                    "Request failed"
                );
            }
            _ => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = error.kind_str(),
                    "Request failed"
                );
            }
        }

        let message = error.message().unwrap_or_default();

        match error.kind {
            CoreErrorKind::NotFound if message.is_empty() => ErrorKind::NotFound.into_error(),
            CoreErrorKind::NotFound => ErrorKind::NotFound.with_message(message.to_owned()),

            CoreErrorKind::Upstream => {
                let status = error
                    .status()
                    .and_then(|status| StatusCode::from_u16(status).ok())
                    .unwrap_or(StatusCode::BAD_GATEWAY);

                ErrorKind::Upstream(status)
                    .with_message(format!("Auxiliary service error: {message}"))
            }

            CoreErrorKind::Timeout => ErrorKind::GatewayTimeout.with_context(message.to_owned()),
            CoreErrorKind::Unavailable => {
                ErrorKind::ServiceUnavailable.with_context(message.to_owned())
            }

            CoreErrorKind::Internal | CoreErrorKind::Configuration => {
                let detail = if message.is_empty() {
                    error.to_string()
                } else {
                    message.to_owned()
                };

                ErrorKind::InternalServerError.with_message(format!("Internal error: {detail}"))
            }
        }
    }
}
