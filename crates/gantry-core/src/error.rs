//! Structured error handling shared by the cloud wrappers and the gateway client.

use strum::{AsRefStr, Display, IntoStaticStr};
use thiserror::Error;

/// Thread-safe boxed error kept as the cause of an [`Error`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur below the HTTP layer.
///
/// The outermost HTTP handler is the only place where a kind is turned into a
/// status code; everything underneath logs and propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The requested entry does not exist.
    NotFound,
    /// A downstream HTTP call answered with a non-2xx status.
    Upstream,
    /// A downstream call exceeded its deadline.
    Timeout,
    /// A downstream call failed at the connection level.
    Unavailable,
    /// Anything else, including cloud API and role assumption failures.
    Internal,
    /// Invalid or missing configuration.
    Configuration,
}

/// Structured error type with classification and upstream context.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// Classification used by the HTTP layer to pick a status code.
    pub kind: ErrorKind,
    /// Primary error message. For upstream errors this is the upstream body.
    pub message: Option<String>,
    /// Status code reported by the upstream service, if any.
    pub status: Option<u16>,
    /// Lower-level cause (SDK, transport or decode error).
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Bare error of `kind` without message or cause.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            source: None,
        }
    }

    /// Error of `kind` caused by `source`.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::new(kind)
        }
    }

    /// Sets the human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the lower-level cause.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The requested entry does not exist.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Creates an upstream error preserving the upstream status and body.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ErrorKind::Upstream).with_message(body)
        }
    }

    /// A downstream deadline elapsed.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// A downstream service could not be reached.
    pub fn unavailable() -> Self {
        Self::new(ErrorKind::Unavailable)
    }

    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal)
    }

    /// Startup options are invalid.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message, if any.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the upstream status code, if any.
    #[inline]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Snake-case kind name for structured logs.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Internal);
        assert_eq!(error.kind(), ErrorKind::Internal);
        assert!(error.message.is_none());
        assert!(error.status.is_none());
        assert!(error.source.is_none());
    }

    #[test]
    fn test_upstream_preserves_status_and_body() {
        let error = Error::upstream(502, "bad gateway");
        assert_eq!(error.kind(), ErrorKind::Upstream);
        assert_eq!(error.status(), Some(502));
        assert_eq!(error.message(), Some("bad gateway"));
    }

    #[test]
    fn test_error_display() {
        let error = Error::timeout().with_message("deadline exceeded");

        assert_eq!(error.to_string(), "[timeout]: deadline exceeded");

        assert_eq!(Error::unavailable().to_string(), "[unavailable]");
    }

    #[test]
    fn test_from_source() {
        let error = Error::from_source(ErrorKind::Internal, std::io::Error::other("reset"));

        assert!(StdError::source(&error).is_some());
        assert_eq!(error.kind_str(), "internal");
    }
}
