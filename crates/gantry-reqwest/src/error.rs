//! Mapping of transport failures onto [`Error`].

use crate::Error;

/// Classifies a failed outbound request.
///
/// Timeouts and connection failures get their own kinds; everything else is
/// internal and carries the transport error text.
pub(crate) fn from_reqwest(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timeout()
            .with_message("request to auxiliary service timed out")
            .with_source(error)
    } else if error.is_connect() {
        Error::unavailable()
            .with_message("connection to auxiliary service failed")
            .with_source(error)
    } else {
        Error::internal()
            .with_message(error.to_string())
            .with_source(error)
    }
}

/// Wraps a body that is not valid JSON.
pub(crate) fn from_serde(error: serde_json::Error) -> Error {
    Error::internal()
        .with_message(format!("invalid JSON from auxiliary service: {error}"))
        .with_source(error)
}
