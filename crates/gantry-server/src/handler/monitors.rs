//! Liveness and version handlers shared by both services.
//!
//! Neither handler touches a downstream dependency, so both answer 200 for
//! as long as the process is up.

use axum::extract::{FromRef, State};
use axum::routing::get;
use axum::{Json, Router};
use gantry_core::types::{HealthStatus, VersionInfo};
use gantry_core::{BuildInfo, Settings};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "gantry_server::handler::monitors";

async fn health(State(settings): State<Settings>) -> Json<HealthStatus> {
    tracing::trace!(target: TRACING_TARGET, "Health check requested");
    Json(HealthStatus::healthy(&settings))
}

async fn version(
    State(settings): State<Settings>,
    State(build): State<BuildInfo>,
) -> Json<VersionInfo> {
    tracing::trace!(target: TRACING_TARGET, "Version requested");
    Json(VersionInfo::new(&build, &settings))
}

/// Returns a [`Router`] with the monitor routes.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Settings: FromRef<S>,
    BuildInfo: FromRef<S>,
{
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}
