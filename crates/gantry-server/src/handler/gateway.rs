//! Handlers of the gateway service.
//!
//! Every handler forwards to the auxiliary service and returns its body as
//! is. The gateway holds no cloud credentials.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use gantry_core::Settings;
use gantry_core::types::{ParameterName, ServiceDescriptor};
use gantry_reqwest::AuxClient;
use serde_json::Value;

use crate::handler::Result;
use crate::service::GatewayState;

/// Tracing target for gateway handlers.
const TRACING_TARGET: &str = "gantry_server::handler::gateway";

async fn root(State(settings): State<Settings>) -> Json<ServiceDescriptor> {
    let descriptor = ServiceDescriptor::new("Gantry Gateway Service", &settings)
        .with_endpoint("health", "/health")
        .with_endpoint("config", "/config")
        .with_endpoint("storage", "/storage")
        .with_endpoint("version", "/version");

    Json(descriptor)
}

async fn storage(State(aux_client): State<AuxClient>) -> Result<Json<Value>> {
    tracing::debug!(target: TRACING_TARGET, "Forwarding bucket listing");
    Ok(Json(aux_client.list_buckets().await?))
}

async fn config(State(aux_client): State<AuxClient>) -> Result<Json<Value>> {
    tracing::debug!(target: TRACING_TARGET, "Forwarding parameter listing");
    Ok(Json(aux_client.list_parameters().await?))
}

async fn config_value(
    State(aux_client): State<AuxClient>,
    Path(name): Path<String>,
) -> Result<Json<Value>> {
    let name = ParameterName::new(name);
    tracing::debug!(target: TRACING_TARGET, name = %name, "Forwarding parameter fetch");
    Ok(Json(aux_client.get_parameter(&name).await?))
}

/// Returns a [`Router`] with the forwarding routes.
///
/// The auxiliary paths are served as well so both services expose the same
/// operations.
pub fn routes() -> Router<GatewayState> {
    Router::new()
        .route("/", get(root))
        .route("/storage", get(storage))
        .route("/s3/buckets", get(storage))
        .route("/config", get(config))
        .route("/parameters", get(config))
        .route("/config/{*name}", get(config_value))
        .route("/parameters/{*name}", get(config_value))
}
