//! Cloud client configuration.

use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for credential resolution and cloud API timeouts.
///
/// # Environment Variables
///
/// - `AWS_ROLE_ARN` - Role to assume; ambient credentials are used when unset or empty
/// - `AWS_ROLE_SESSION_NAME` - Session name for the assumed role (default: gantry-aux)
/// - `AWS_CONNECT_TIMEOUT` - Connect timeout in seconds (default: 5)
/// - `AWS_OPERATION_TIMEOUT` - Per-operation timeout in seconds (default: 10)
/// - `AWS_ENDPOINT_URL` - Endpoint override for every cloud API, e.g. a local emulator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct AwsConfig {
    /// ARN of the role to assume for delegated credentials.
    #[cfg_attr(feature = "config", arg(long, env = "AWS_ROLE_ARN"))]
    pub role_arn: Option<String>,

    /// Session name attached to the assumed role.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "AWS_ROLE_SESSION_NAME", default_value = "gantry-aux")
    )]
    pub session_name: String,

    /// Connect timeout for cloud API calls in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "aws-connect-timeout", env = "AWS_CONNECT_TIMEOUT", default_value_t = 5)
    )]
    pub connect_timeout: u64,

    /// Overall timeout for a single cloud API operation in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "aws-operation-timeout", env = "AWS_OPERATION_TIMEOUT", default_value_t = 10)
    )]
    pub operation_timeout: u64,

    /// Endpoint override applied to every cloud client.
    #[cfg_attr(feature = "config", arg(long = "aws-endpoint-url", env = "AWS_ENDPOINT_URL"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    /// Returns the role to assume, treating an empty value as absent.
    #[must_use]
    pub fn role_arn(&self) -> Option<&str> {
        self.role_arn
            .as_deref()
            .map(str::trim)
            .filter(|arn| !arn.is_empty())
    }

    /// Returns the endpoint override, treating an empty value as absent.
    #[must_use]
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Points every cloud client at the given endpoint.
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Sets the role to assume.
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    /// Returns the SDK timeout configuration.
    pub fn timeout_config(&self) -> TimeoutConfig {
        TimeoutConfig::builder()
            .connect_timeout(Duration::from_secs(self.connect_timeout))
            .operation_timeout(Duration::from_secs(self.operation_timeout))
            .build()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.session_name.trim().is_empty() {
            return Err(Error::configuration().with_message("role session name cannot be empty"));
        }

        if self.connect_timeout == 0 || self.operation_timeout == 0 {
            return Err(
                Error::configuration().with_message("cloud API timeouts must be at least 1 second")
            );
        }

        if self.connect_timeout > self.operation_timeout {
            return Err(Error::configuration()
                .with_message("cloud connect timeout cannot exceed the operation timeout"));
        }

        Ok(())
    }
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            role_arn: None,
            session_name: "gantry-aux".to_owned(),
            connect_timeout: 5,
            operation_timeout: 10,
            endpoint_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_role_is_absent() {
        assert!(AwsConfig::default().role_arn().is_none());
        assert!(AwsConfig::default().with_role_arn("  ").role_arn().is_none());

        let config = AwsConfig::default().with_role_arn("arn:aws:iam::123456789012:role/aux");
        assert_eq!(config.role_arn(), Some("arn:aws:iam::123456789012:role/aux"));
    }

    #[test]
    fn empty_endpoint_is_absent() {
        assert!(AwsConfig::default().endpoint_url().is_none());
        assert!(AwsConfig::default().with_endpoint_url("").endpoint_url().is_none());

        let config = AwsConfig::default().with_endpoint_url("http://localhost:4566");
        assert_eq!(config.endpoint_url(), Some("http://localhost:4566"));
    }

    #[test]
    fn validate_default_config() {
        assert!(AwsConfig::default().validate().is_ok());
    }

    #[test]
    fn reject_invalid_timeouts() {
        let mut config = AwsConfig::default();
        config.connect_timeout = 0;
        assert!(config.validate().is_err());

        config.connect_timeout = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn timeout_config_carries_values() {
        let timeouts = AwsConfig::default().timeout_config();
        assert_eq!(timeouts.connect_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(timeouts.operation_timeout(), Some(Duration::from_secs(10)));
    }
}
