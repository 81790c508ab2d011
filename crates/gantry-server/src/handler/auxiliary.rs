//! Handlers of the auxiliary service.
//!
//! The only handlers in the system that reach cloud APIs. Parameter routes
//! are mounted under both `/parameters` and `/config`.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use gantry_aws::{ParameterLookup, ParameterService, StorageService};
use gantry_core::Settings;
use gantry_core::types::{BucketList, ParameterList, ParameterName, ParameterValue, ServiceDescriptor};

use crate::handler::{ErrorKind, Result};
use crate::service::AuxiliaryState;

/// Tracing target for auxiliary service handlers.
const TRACING_TARGET: &str = "gantry_server::handler::auxiliary";

async fn root(State(settings): State<Settings>) -> Json<ServiceDescriptor> {
    let descriptor = ServiceDescriptor::new("Gantry Auxiliary Service", &settings)
        .with_capability("storage_read")
        .with_capability("config_read")
        .with_endpoint("health", "/health")
        .with_endpoint("s3_buckets", "/s3/buckets")
        .with_endpoint("parameters", "/parameters")
        .with_endpoint("config", "/config")
        .with_endpoint("version", "/version");

    Json(descriptor)
}

async fn list_buckets(State(storage): State<StorageService>) -> Result<Json<BucketList>> {
    tracing::debug!(target: TRACING_TARGET, "Listing buckets");

    let buckets = storage.list_buckets().await?;
    Ok(Json(BucketList::from(buckets)))
}

async fn list_parameters(State(parameters): State<ParameterService>) -> Result<Json<ParameterList>> {
    tracing::debug!(target: TRACING_TARGET, "Listing parameters");

    let parameters = parameters.list_all_parameters().await?;
    Ok(Json(ParameterList::from(parameters)))
}

async fn get_parameter(
    State(parameters): State<ParameterService>,
    Path(name): Path<String>,
) -> Result<Json<ParameterValue>> {
    let name = ParameterName::new(name);
    tracing::debug!(target: TRACING_TARGET, name = %name, "Fetching parameter");

    match parameters.get_parameter(&name).await? {
        ParameterLookup::Found(value) => Ok(Json(ParameterValue::new(&name, Some(value)))),
        ParameterLookup::NotFound => {
            Err(ErrorKind::NotFound.with_message(format!("Parameter '{name}' not found")))
        }
    }
}

/// Returns a [`Router`] with the storage and parameter routes.
pub fn routes() -> Router<AuxiliaryState> {
    Router::new()
        .route("/", get(root))
        .route("/s3/buckets", get(list_buckets))
        .route("/parameters", get(list_parameters))
        .route("/parameters/{*name}", get(get_parameter))
        .route("/config", get(list_parameters))
        .route("/config/{*name}", get(get_parameter))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use gantry_aws::mock::{MockParameters, MockStorage};
    use jiff::Timestamp;

    use crate::handler::auxiliary_routes;
    use crate::handler::test::{auxiliary_state, create_test_server};

    #[tokio::test]
    async fn lists_buckets_with_count() -> anyhow::Result<()> {
        let created: Timestamp = "2024-01-01T00:00:00Z".parse()?;
        let storage = MockStorage::default()
            .with_bucket("a", Some(created))
            .with_bucket("b", None);

        let server = create_test_server(auxiliary_routes(auxiliary_state(
            storage,
            MockParameters::new(),
        )))?;

        let response = server.get("/s3/buckets").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["count"], 2);
        assert_eq!(body["buckets"][0]["name"], "a");
        assert_eq!(body["buckets"][0]["creation_date"], "2024-01-01T00:00:00Z");
        assert!(body["buckets"][1]["creation_date"].is_null());
        Ok(())
    }

    #[tokio::test]
    async fn empty_bucket_list() -> anyhow::Result<()> {
        let server = create_test_server(auxiliary_routes(auxiliary_state(
            MockStorage::default(),
            MockParameters::new(),
        )))?;

        let body: serde_json::Value = server.get("/s3/buckets").await.json();
        assert_eq!(body, serde_json::json!({ "count": 0, "buckets": [] }));
        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_is_internal_error() -> anyhow::Result<()> {
        let server = create_test_server(auxiliary_routes(auxiliary_state(
            MockStorage::failing("ListBuckets failed: access denied"),
            MockParameters::new(),
        )))?;

        let response = server.get("/s3/buckets").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "internal_server_error");
        assert_eq!(
            body["detail"],
            "Internal error: ListBuckets failed: access denied"
        );
        Ok(())
    }

    #[tokio::test]
    async fn lists_parameters_across_pages() -> anyhow::Result<()> {
        let parameters = MockParameters::new()
            .with_page_size(1)
            .with_parameter("/app/a", "String", "1")
            .with_parameter("/app/b", "SecureString", "2")
            .with_parameter("/app/c", "StringList", "3");

        let server = create_test_server(auxiliary_routes(auxiliary_state(
            MockStorage::default(),
            parameters,
        )))?;

        for path in ["/parameters", "/config"] {
            let body: serde_json::Value = server.get(path).await.json();
            assert_eq!(body["count"], 3);
            assert_eq!(body["parameters"][1]["name"], "/app/b");
            assert_eq!(body["parameters"][1]["type"], "SecureString");
            assert!(body["parameters"][1].get("value").is_none());
        }
        Ok(())
    }

    #[tokio::test]
    async fn fetches_nested_parameter() -> anyhow::Result<()> {
        let parameters =
            MockParameters::new().with_parameter("/app/db/password", "SecureString", "hunter2");
        let recorder = parameters.clone();

        let server = create_test_server(auxiliary_routes(auxiliary_state(
            MockStorage::default(),
            parameters,
        )))?;

        for path in ["/parameters/app/db/password", "/config/app/db/password"] {
            let response = server.get(path).await;
            response.assert_status_ok();
            response.assert_json(&serde_json::json!({
                "name": "/app/db/password",
                "value": "hunter2",
            }));
        }
        assert_eq!(recorder.decryption_requests(), vec![true, true]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_parameter_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server(auxiliary_routes(auxiliary_state(
            MockStorage::default(),
            MockParameters::new(),
        )))?;

        let response = server.get("/parameters/missing").await;
        response.assert_status_not_found();

        let body: serde_json::Value = response.json();
        assert_eq!(body["detail"], "Parameter '/missing' not found");
        assert!(body.get("value").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn parameter_failure_is_internal_error() -> anyhow::Result<()> {
        let server = create_test_server(auxiliary_routes(auxiliary_state(
            MockStorage::default(),
            MockParameters::failing("throttled"),
        )))?;

        server
            .get("/parameters/app/key")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }

    #[tokio::test]
    async fn root_describes_service() -> anyhow::Result<()> {
        let server = create_test_server(auxiliary_routes(auxiliary_state(
            MockStorage::default(),
            MockParameters::new(),
        )))?;

        let body: serde_json::Value = server.get("/").await.json();
        assert_eq!(body["service"], "Gantry Auxiliary Service");
        assert_eq!(body["endpoints"]["s3_buckets"], "/s3/buckets");
        assert_eq!(body["capabilities"][1], "config_read");
        Ok(())
    }
}
