//! Construction of the per-service state from configuration.

use anyhow::Context;
use gantry_aws::{
    AwsConfig, CredentialSource, ParameterService, S3Storage, SsmParameters, StorageService,
    resolve_credentials,
};
use gantry_core::{BuildInfo, Settings};
use gantry_reqwest::{AuxClient, AuxClientConfig};
use gantry_server::service::{AuxiliaryState, GatewayState};

use crate::TRACING_TARGET_SERVER_STARTUP;

/// Creates the auxiliary service state.
///
/// Credentials are resolved before the server binds, so a role that cannot
/// be assumed aborts startup.
pub async fn create_auxiliary_state(
    settings: &Settings,
    build: &BuildInfo,
    aws: &AwsConfig,
) -> anyhow::Result<AuxiliaryState> {
    aws.validate().context("invalid cloud configuration")?;

    let credentials = resolve_credentials(aws, settings.region.clone())
        .await
        .context("failed to resolve cloud credentials")?;

    match credentials.source() {
        CredentialSource::Ambient => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_STARTUP,
                region = %settings.region,
                "Cloud clients use ambient credentials"
            );
        }
        CredentialSource::Delegated {
            role_arn,
            session_name,
            expires_at,
        } => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_STARTUP,
                region = %settings.region,
                role_arn = %role_arn,
                session_name = %session_name,
                expires_at = ?expires_at,
                "Cloud clients use delegated credentials"
            );
        }
    }

    let sdk_config = credentials.sdk_config();
    let storage = StorageService::new(S3Storage::new(sdk_config));
    let parameters = ParameterService::new(SsmParameters::new(sdk_config));

    Ok(AuxiliaryState::new(
        settings.clone(),
        build.clone(),
        storage,
        parameters,
    ))
}

/// Creates the gateway service state.
pub fn create_gateway_state(
    settings: &Settings,
    build: &BuildInfo,
    aux_client: &AuxClientConfig,
) -> anyhow::Result<GatewayState> {
    let client =
        AuxClient::new(aux_client.clone()).context("failed to create auxiliary service client")?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        aux_service_url = %client.config().base_url,
        "Gateway forwards to auxiliary service"
    );

    Ok(GatewayState::new(settings.clone(), build.clone(), client))
}
