//! Failures of the serving phase.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Error raised while binding or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Server options were rejected before binding.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The listening socket could not be opened.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The accept loop failed after startup.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Wraps a validation failure, keeping its whole context chain.
    pub fn invalid_config(err: &anyhow::Error) -> Self {
        Self::InvalidConfig(format!("{err:#}"))
    }

    /// Wraps a failed bind of `address`.
    pub fn bind(address: impl ToString, source: io::Error) -> Self {
        Self::Bind {
            address: address.to_string(),
            source,
        }
    }

    /// Stable code used in logs.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "E001",
            Self::Bind { .. } => "E002",
            Self::Runtime(_) => "E003",
        }
    }

    /// Hint printed next to the error on exit.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig(_) => Some("Run `gantry --help` to list options and their variables"),
            Self::Bind { source, .. } => Some(match source.kind() {
                io::ErrorKind::AddrInUse => "Another process listens on this port, set PORT to a free one",
                io::ErrorKind::PermissionDenied => "Binding this port needs privileges, pick a port >= 1024",
                io::ErrorKind::AddrNotAvailable => "HOST is not an address of this machine",
                _ => "Check HOST and PORT",
            }),
            Self::Runtime(_) => None,
        }
    }
}
