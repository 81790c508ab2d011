#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod credentials;
mod error;
#[cfg(any(test, feature = "test-utils"))]
mod pagination;

pub mod parameters;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use gantry_core::{Error, ErrorKind, Result};

pub use crate::config::AwsConfig;
pub use crate::credentials::{CredentialSource, ResolvedCredentials, resolve_credentials};
pub use crate::parameters::{ParameterLookup, ParameterProvider, ParameterService, SsmParameters};
pub use crate::storage::{S3Storage, StorageProvider, StorageService};

/// Tracing target for credential resolution.
pub const TRACING_TARGET_CREDENTIALS: &str = "gantry_aws::credentials";

/// Tracing target for object-storage operations.
pub const TRACING_TARGET_STORAGE: &str = "gantry_aws::storage";

/// Tracing target for parameter-store operations.
pub const TRACING_TARGET_PARAMETERS: &str = "gantry_aws::parameters";
