use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body of every failed request.
///
/// Serialized as `{"name": ..., "detail": ...}`. The status code is carried
/// alongside but never serialized.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// Stable, machine-readable error name.
    pub name: Cow<'a, str>,
    /// Human-readable description safe for client display.
    pub detail: Cow<'a, str>,
    /// Response status, kept out of the body.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const NOT_FOUND: Self = Self::new("not_found", "Not found", StatusCode::NOT_FOUND);

    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "Internal service unavailable",
        StatusCode::SERVICE_UNAVAILABLE,
    );
    pub const GATEWAY_TIMEOUT: Self = Self::new(
        "gateway_timeout",
        "Timeout connecting to internal service",
        StatusCode::GATEWAY_TIMEOUT,
    );

    #[inline]
    pub const fn new(name: &'a str, detail: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            detail: Cow::Borrowed(detail),
            status,
        }
    }

    /// Creates an error response for a failed upstream call, keeping its status.
    pub fn upstream(status: StatusCode) -> Self {
        Self::new("upstream_error", "Auxiliary service error", status)
    }

    /// Replaces the detail.
    pub fn with_detail(mut self, detail: impl Into<Cow<'a, str>>) -> Self {
        self.detail = detail.into();
        self
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_name_and_detail_only() {
        let response = ErrorResponse::NOT_FOUND.with_detail("Parameter '/x' not found");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "not_found",
                "detail": "Parameter '/x' not found",
            })
        );
    }

    #[test]
    fn upstream_keeps_status() {
        let response = ErrorResponse::upstream(StatusCode::FORBIDDEN);
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.into_response().status(), StatusCode::FORBIDDEN);
    }
}
