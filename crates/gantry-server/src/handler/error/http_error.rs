//! Client-facing handler error.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Result type of every handler.
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Error returned by handlers and rendered as `{"name", "detail"}`.
///
/// `message` replaces the default detail of the kind. `context` is only
/// logged and never reaches the client.
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless returned from a handler"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
}

impl Error<'static> {
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches diagnostic context for logs.
    #[inline]
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Overrides the detail sent to the client.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Body and status this error renders to.
    pub fn response(&self) -> ErrorResponse<'_> {
        let response = self.kind.response();
        match self.message.as_deref() {
            Some(detail) => response.with_detail(detail),
            None => response,
        }
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.response();
        write!(f, "{} {}: {}", response.status.as_u16(), response.name, response.detail)?;
        match self.context.as_deref() {
            Some(context) => write!(f, " ({context})"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let Self { kind, message, .. } = self;
        match message {
            Some(detail) => kind.response().with_detail(detail).into_response(),
            None => kind.into_response(),
        }
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Failure classes a handler can report.
#[must_use = "error kinds do nothing unless turned into errors"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 404, unknown route or missing parameter.
    NotFound,
    /// 500.
    InternalServerError,
    /// 503, the auxiliary service could not be reached.
    ServiceUnavailable,
    /// 504, the auxiliary service or the request deadline timed out.
    GatewayTimeout,
    /// Non-success status of the auxiliary service, passed through as is.
    Upstream(StatusCode),
}

impl ErrorKind {
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Shorthand for `Error::new(kind).with_context(..)`.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error {
            kind: self,
            context: Some(context.into()),
            message: None,
        }
    }

    /// Shorthand for `Error::new(kind).with_message(..)`.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error {
            kind: self,
            context: None,
            message: Some(message.into()),
        }
    }

    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Default body and status of this kind.
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => ErrorResponse::SERVICE_UNAVAILABLE,
            Self::GatewayTimeout => ErrorResponse::GATEWAY_TIMEOUT,
            Self::Upstream(status) => ErrorResponse::upstream(status),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.response().name)
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_kind_uses_default_detail() {
        let response = ErrorKind::InternalServerError.into_error().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_replaces_detail() {
        let error = ErrorKind::NotFound.with_message("Parameter '/x' not found");
        assert_eq!(error.response().detail, "Parameter '/x' not found");
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn context_is_not_the_detail() {
        let error = ErrorKind::InternalServerError.with_context("pool exhausted");
        assert_eq!(error.context(), Some("pool exhausted"));
        assert_eq!(error.response().detail, "An internal server error occurred");
    }

    #[test]
    fn status_codes() {
        assert_eq!(ErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorKind::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorKind::GatewayTimeout.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ErrorKind::Upstream(StatusCode::CONFLICT).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn display_includes_status_and_context() {
        let error = ErrorKind::GatewayTimeout.with_context("GET /parameters");
        assert_eq!(
            error.to_string(),
            "504 gateway_timeout: Timeout connecting to internal service (GET /parameters)"
        );
    }
}
