//! HTTP server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Result as AnyhowResult, ensure};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Listener options shared by both services.
///
/// ```bash
/// gantry --host 0.0.0.0 --port 8080 aux
/// HOST=0.0.0.0 PORT=8080 gantry gateway
/// ```
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Interface address to listen on. `0.0.0.0` exposes every interface.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    #[serde(default = "ServerConfig::localhost")]
    pub host: IpAddr,

    /// Listening port, 1024 or above.
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Seconds granted to in-flight requests after a shutdown signal (1-300).
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    const MAX_SHUTDOWN_TIMEOUT: u64 = 300;

    fn localhost() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    /// Rejects privileged ports and out-of-range shutdown timeouts.
    pub fn validate(&self) -> AnyhowResult<()> {
        ensure!(
            self.port >= 1024,
            "port {} is privileged, use 1024 or above",
            self.port
        );
        ensure!(
            (1..=Self::MAX_SHUTDOWN_TIMEOUT).contains(&self.shutdown_timeout),
            "shutdown timeout must be 1-{} seconds, got {}",
            Self::MAX_SHUTDOWN_TIMEOUT,
            self.shutdown_timeout
        );

        Ok(())
    }

    /// Socket address to bind.
    #[inline]
    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Upper bound on draining after a shutdown signal.
    #[inline]
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Returns `true` for `0.0.0.0` or `::`.
    #[inline]
    #[must_use]
    pub const fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    /// Logs server configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.server_addr(),
            shutdown_timeout_secs = self.shutdown_timeout,
            "Listener configuration"
        );
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::localhost(),
            port: 8000,
            shutdown_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.server_addr().to_string(), "127.0.0.1:8000");
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
        assert!(!config.binds_to_all_interfaces());
    }

    #[test]
    fn privileged_port_is_rejected() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shutdown_timeout_bounds() {
        for timeout in [0, 301] {
            let config = ServerConfig {
                shutdown_timeout: timeout,
                ..ServerConfig::default()
            };
            assert!(config.validate().is_err(), "timeout {timeout} accepted");
        }
    }

    #[test]
    fn unspecified_host_binds_everywhere() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            ..ServerConfig::default()
        };
        assert!(config.binds_to_all_interfaces());
    }
}
