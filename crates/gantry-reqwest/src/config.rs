//! Configuration for the auxiliary service client.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default values for the client configuration.
mod defaults {
    /// Cluster-internal address of the auxiliary service.
    pub const SERVICE_URL: &str = "http://aux.aux.svc.cluster.local:80";

    /// Connect timeout in seconds.
    pub const CONNECT_TIMEOUT: u64 = 5;

    /// Total request timeout in seconds.
    pub const REQUEST_TIMEOUT: u64 = 10;
}

/// Configuration for [`AuxClient`].
///
/// [`AuxClient`]: crate::AuxClient
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct AuxClientConfig {
    /// Base URL of the auxiliary service.
    #[cfg_attr(
        feature = "config",
        arg(long = "aux-service-url", env = "AUX_SERVICE_URL", default_value = defaults::SERVICE_URL)
    )]
    pub base_url: Url,

    /// Connect timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "aux-connect-timeout", env = "AUX_CONNECT_TIMEOUT", default_value_t = defaults::CONNECT_TIMEOUT)
    )]
    pub connect_timeout: u64,

    /// Total timeout for a single request in seconds, including the body.
    #[cfg_attr(
        feature = "config",
        arg(long = "aux-request-timeout", env = "AUX_REQUEST_TIMEOUT", default_value_t = defaults::REQUEST_TIMEOUT)
    )]
    pub request_timeout: u64,
}

impl AuxClientConfig {
    /// Creates a configuration for the given base URL with default timeouts.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: defaults::CONNECT_TIMEOUT,
            request_timeout: defaults::REQUEST_TIMEOUT,
        }
    }

    /// Sets both timeouts in seconds.
    pub fn with_timeouts(mut self, connect_timeout: u64, request_timeout: u64) -> Self {
        self.connect_timeout = connect_timeout;
        self.request_timeout = request_timeout;
        self
    }

    /// Returns the connect timeout.
    #[inline]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Returns the total request timeout.
    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Returns the user agent sent with every request.
    pub fn user_agent(&self) -> String {
        format!("gantry-gateway/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(Error::configuration().with_message(format!(
                "auxiliary service URL must use http or https, got '{}'",
                self.base_url.scheme()
            )));
        }

        if self.base_url.host_str().is_none() {
            return Err(
                Error::configuration().with_message("auxiliary service URL must include a host")
            );
        }

        if self.connect_timeout == 0 || self.request_timeout == 0 {
            return Err(Error::configuration()
                .with_message("auxiliary service timeouts must be at least 1 second"));
        }

        if self.connect_timeout > self.request_timeout {
            return Err(Error::configuration()
                .with_message("auxiliary connect timeout cannot exceed the request timeout"));
        }

        Ok(())
    }
}

impl Default for AuxClientConfig {
    fn default() -> Self {
        // The default is a constant known to parse.
        let base_url = Url::parse(defaults::SERVICE_URL)
            .unwrap_or_else(|_| unreachable!("default auxiliary service URL is valid"));
        Self::new(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AuxClientConfig::default();
        assert_eq!(
            config.base_url.host_str(),
            Some("aux.aux.svc.cluster.local")
        );
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reject_unsupported_scheme() {
        let config = AuxClientConfig::new(Url::parse("ftp://aux.internal").unwrap());
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_invalid_timeouts() {
        let config = AuxClientConfig::default().with_timeouts(0, 10);
        assert!(config.validate().is_err());

        let config = AuxClientConfig::default().with_timeouts(20, 10);
        assert!(config.validate().is_err());
    }
}
