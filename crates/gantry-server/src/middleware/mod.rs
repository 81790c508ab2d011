//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Observability: request ids and request tracing
//! - Security: CORS
//! - Recovery: request timeouts and panics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::Router;
//! use gantry_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_cors(&CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod observability;
mod recovery;
mod security;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt};
