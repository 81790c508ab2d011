//! Response bodies that are specific to the HTTP layer.

mod error_response;

pub use error_response::ErrorResponse;
