//! Options of the CORS and recovery layers.
//!
//! ```bash
//! gantry --cors-origins "https://example.com" --request-timeout 60 gateway
//! ```

use clap::Args;
use gantry_server::middleware::{CorsConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Options applied to every route of either service.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Allowed origins and preflight caching.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Inbound request deadline.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            cors_origins = ?self.cors.allowed_origins,
            cors_any_origin = self.cors.allowed_origins.is_empty(),
            request_timeout_secs = self.recovery.request_timeout,
            "Middleware configuration"
        );
    }
}
