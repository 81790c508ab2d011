//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod auxiliary;
mod error;
mod gateway;
mod monitors;
mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::service::{AuxiliaryState, GatewayState};

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with every route of the auxiliary service.
pub fn auxiliary_routes(state: AuxiliaryState) -> Router {
    Router::new()
        .merge(monitors::routes())
        .merge(auxiliary::routes())
        .fallback(fallback)
        .with_state(state)
}

/// Returns a [`Router`] with every route of the gateway service.
pub fn gateway_routes(state: GatewayState) -> Router {
    Router::new()
        .merge(monitors::routes())
        .merge(gateway::routes())
        .fallback(fallback)
        .with_state(state)
}

#[cfg(test)]
mod test {
    use axum::Router;
    use axum_test::TestServer;
    use gantry_aws::mock::{MockParameters, MockStorage};
    use gantry_core::{BuildInfo, Settings};

    use crate::service::AuxiliaryState;

    /// Returns settings with a recognizable service name.
    pub fn settings(service_name: &str) -> Settings {
        Settings {
            service_name: service_name.to_owned(),
            ..Settings::default()
        }
    }

    /// Returns an auxiliary state backed by in-memory providers.
    pub fn auxiliary_state(storage: MockStorage, parameters: MockParameters) -> AuxiliaryState {
        AuxiliaryState::new(
            settings("aux"),
            BuildInfo::default(),
            storage.into_service(),
            parameters.into_service(),
        )
    }

    /// Returns a new [`TestServer`] with the given router.
    pub fn create_test_server(router: Router) -> anyhow::Result<TestServer> {
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() -> anyhow::Result<()> {
        let state = auxiliary_state(MockStorage::default(), MockParameters::new());
        let server = create_test_server(super::auxiliary_routes(state))?;

        let response = server.get("/does/not/exist").await;
        response.assert_status_not_found();

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }
}
