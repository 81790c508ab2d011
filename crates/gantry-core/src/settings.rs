//! Process-wide settings read once at startup.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default values for settings.
mod defaults {
    /// Default service name when none is configured.
    pub const SERVICE_NAME: &str = "unknown";

    /// Default cloud region.
    pub const REGION: &str = "eu-west-1";

    /// Default deployment environment.
    pub const ENVIRONMENT: &str = "dev";

    /// Default log level.
    pub const LOG_LEVEL: &str = "INFO";

    /// Placeholder for missing build metadata.
    pub const UNKNOWN: &str = "unknown";
}

/// Runtime settings shared by both services.
///
/// Immutable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "settings do nothing unless you use them"]
pub struct Settings {
    /// Logical service name reported by health and version endpoints.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "SERVICE_NAME", default_value = "unknown")
    )]
    pub service_name: String,

    /// Cloud region used for every outbound cloud API call.
    #[cfg_attr(
        feature = "config",
        arg(long = "aws-region", env = "AWS_REGION", default_value = "eu-west-1")
    )]
    pub region: String,

    /// Deployment environment name.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "ENVIRONMENT", default_value = "dev")
    )]
    pub environment: String,

    /// Log level (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "LOG_LEVEL", default_value = "INFO")
    )]
    pub log_level: String,
}

impl Settings {
    /// Maps the configured log level to a `tracing` filter directive.
    ///
    /// Unknown levels fall back to `info`.
    #[must_use]
    pub fn log_directive(&self) -> &'static str {
        match self.log_level.trim().to_ascii_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "WARN" | "WARNING" => "warn",
            "ERROR" | "CRITICAL" | "FATAL" => "error",
            _ => "info",
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_name: defaults::SERVICE_NAME.to_owned(),
            region: defaults::REGION.to_owned(),
            environment: defaults::ENVIRONMENT.to_owned(),
            log_level: defaults::LOG_LEVEL.to_owned(),
        }
    }
}

/// Build metadata injected by the image build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct BuildInfo {
    /// Version identifier, usually the git SHA of the build.
    #[cfg_attr(
        feature = "config",
        arg(id = "build_version", long = "build-version", env = "VERSION", default_value = "unknown")
    )]
    pub version: String,

    /// ISO-8601 timestamp of the build.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "BUILD_TIME", default_value = "unknown")
    )]
    pub build_time: String,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: defaults::UNKNOWN.to_owned(),
            build_time: defaults::UNKNOWN.to_owned(),
        }
    }
}
