//! Credential resolution for cloud clients.
//!
//! Two modes are supported. Without a role the default provider chain is
//! used as is. With a role the process assumes it through STS and every
//! client built from the returned configuration acts as that role.

use aws_config::sts::AssumeRoleProvider;
use aws_config::{BehaviorVersion, ConfigLoader, Region, SdkConfig};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use jiff::Timestamp;

use crate::{AwsConfig, Error, Result, TRACING_TARGET_CREDENTIALS};

/// Where the resolved credentials come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Default provider chain of the process environment.
    Ambient,
    /// Short-lived credentials of an assumed role.
    Delegated {
        role_arn: String,
        session_name: String,
        /// Expiry of the first set of credentials.
        ///
        /// Subsequent sets are refreshed by the SDK before they expire.
        expires_at: Option<Timestamp>,
    },
}

/// SDK configuration bound to a region and a credential source.
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    sdk_config: SdkConfig,
    source: CredentialSource,
}

impl ResolvedCredentials {
    /// Returns the SDK configuration every cloud client is built from.
    #[inline]
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.sdk_config
    }

    /// Returns the credential source.
    #[inline]
    pub fn source(&self) -> &CredentialSource {
        &self.source
    }

    /// Returns `true` when credentials come from an assumed role.
    #[inline]
    pub fn is_delegated(&self) -> bool {
        matches!(self.source, CredentialSource::Delegated { .. })
    }
}

/// Resolves credentials for the configured region.
///
/// When a role is configured it is assumed immediately, so an invalid role
/// or a missing trust relationship fails here instead of on the first
/// request.
pub async fn resolve_credentials(
    config: &AwsConfig,
    region: impl Into<String>,
) -> Result<ResolvedCredentials> {
    let loader = aws_config::defaults(BehaviorVersion::latest());
    resolve_with_loader(config, region, loader).await
}

/// Resolves credentials on top of a caller-provided SDK loader.
pub(crate) async fn resolve_with_loader(
    config: &AwsConfig,
    region: impl Into<String>,
    loader: ConfigLoader,
) -> Result<ResolvedCredentials> {
    let region = Region::new(region.into());

    let mut loader = loader
        .region(region.clone())
        .timeout_config(config.timeout_config());
    if let Some(endpoint_url) = config.endpoint_url() {
        loader = loader.endpoint_url(endpoint_url);
    }
    let base = loader.load().await;

    let Some(role_arn) = config.role_arn() else {
        tracing::info!(
            target: TRACING_TARGET_CREDENTIALS,
            region = %region,
            "Using ambient credentials"
        );

        return Ok(ResolvedCredentials {
            sdk_config: base,
            source: CredentialSource::Ambient,
        });
    };

    tracing::info!(
        target: TRACING_TARGET_CREDENTIALS,
        role_arn = %role_arn,
        session_name = %config.session_name,
        region = %region,
        "Assuming role"
    );

    let provider = AssumeRoleProvider::builder(role_arn)
        .session_name(config.session_name.clone())
        .region(region.clone())
        .configure(&base)
        .build()
        .await;

    let credentials = provider.provide_credentials().await.map_err(|error| {
        tracing::error!(
            target: TRACING_TARGET_CREDENTIALS,
            role_arn = %role_arn,
            error = %error,
            "Failed to assume role"
        );

        Error::internal()
            .with_message(format!("failed to assume role '{role_arn}'"))
            .with_source(error)
    })?;

    let expires_at = credentials
        .expiry()
        .and_then(|expiry| Timestamp::try_from(expiry).ok());

    tracing::info!(
        target: TRACING_TARGET_CREDENTIALS,
        role_arn = %role_arn,
        expires_at = ?expires_at,
        "Assumed role"
    );

    let sdk_config = base
        .into_builder()
        .credentials_provider(SharedCredentialsProvider::new(provider))
        .build();

    Ok(ResolvedCredentials {
        sdk_config,
        source: CredentialSource::Delegated {
            role_arn: role_arn.to_owned(),
            session_name: config.session_name.clone(),
            expires_at,
        },
    })
}
