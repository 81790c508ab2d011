//! Conversion of cloud SDK failures into [`Error`].

use aws_smithy_types::date_time::DateTime;
use aws_smithy_types::error::display::DisplayErrorContext;
use jiff::Timestamp;

use crate::Error;

/// Wraps a failed cloud API call as an internal error.
///
/// The message carries the full SDK error chain so the operator can tell
/// an authorization failure from a throttled call.
pub(crate) fn cloud_error<E>(operation: &'static str, error: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = format!("{operation} failed: {}", DisplayErrorContext(&error));
    Error::internal().with_message(message).with_source(error)
}

/// Converts an SDK timestamp, dropping values outside the supported range.
pub(crate) fn to_timestamp(date_time: &DateTime) -> Option<Timestamp> {
    Timestamp::new(date_time.secs(), date_time.subsec_nanos() as i32).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn cloud_error_is_internal() {
        let source = std::io::Error::other("access denied");
        let error = cloud_error("ListBuckets", source);

        assert_eq!(error.kind, ErrorKind::Internal);
        let message = error.message().unwrap_or_default();
        assert!(message.starts_with("ListBuckets failed"));
        assert!(message.contains("access denied"));
    }

    #[test]
    fn converts_sdk_timestamps() {
        let date_time = DateTime::from_secs(1_704_067_200);
        let timestamp = to_timestamp(&date_time).unwrap();
        assert_eq!(timestamp.to_string(), "2024-01-01T00:00:00Z");
    }
}
