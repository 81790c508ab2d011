//! Command-line and environment configuration of the `gantry` binary.
//!
//! ```text
//! Cli
//! ├── settings: Settings            # Service name, region, environment, log level
//! ├── build: BuildInfo              # Version and build time
//! ├── telemetry: TelemetryConfig    # Log output format
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # CORS, recovery/timeouts
//! └── command
//!     ├── aux: AwsConfig            # Role, session name, cloud timeouts
//!     └── gateway: AuxClientConfig  # Auxiliary service URL and timeouts
//! ```
//!
//! Every option is a flag and an environment variable at the same time.

mod middleware;
mod provider;
mod server;
mod telemetry;

use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use gantry_aws::AwsConfig;
use gantry_core::{BuildInfo, Settings};
use gantry_reqwest::AuxClientConfig;
pub use middleware::MiddlewareConfig;
pub use provider::{create_auxiliary_state, create_gateway_state};
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
pub use telemetry::TelemetryConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Parsed command line of the `gantry` binary.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "gantry")]
#[command(about = "Read-only gateway to cloud storage and parameter listings")]
#[command(version)]
pub struct Cli {
    /// Service to run.
    #[command(subcommand)]
    pub command: Command,

    /// Runtime settings shared by both services.
    #[clap(flatten)]
    pub settings: Settings,

    /// Build metadata reported by `/version`.
    #[clap(flatten)]
    pub build: BuildInfo,

    /// Log output configuration.
    #[clap(flatten)]
    pub telemetry: TelemetryConfig,

    /// Listener address and shutdown timeout.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// CORS and request deadline.
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,
}

/// Services the binary can run.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum Command {
    /// Run the auxiliary service, which holds the cloud credentials.
    Aux(AuxArgs),
    /// Run the gateway service, which forwards to the auxiliary service.
    Gateway(GatewayArgs),
}

impl Command {
    /// Returns the name of the selected service.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Aux(_) => "aux",
            Self::Gateway(_) => "gateway",
        }
    }
}

/// Auxiliary service options.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct AuxArgs {
    /// Credential and cloud API configuration.
    #[clap(flatten)]
    pub aws: AwsConfig,
}

/// Gateway service options.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct GatewayArgs {
    /// Auxiliary service client configuration.
    #[clap(flatten)]
    pub aux_client: AuxClientConfig,
}

impl Cli {
    /// Parses the command line, after loading `.env` when the `dotenv` feature is on.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: ignoring unreadable .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Checks the options of the server and of the selected service.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;

        match &self.command {
            Command::Aux(args) => args
                .aws
                .validate()
                .context("invalid cloud configuration")?,
            Command::Gateway(args) => args
                .aux_client
                .validate()
                .context("invalid auxiliary service configuration")?,
        }

        Ok(())
    }

    /// Logs the effective configuration. Never logs secrets.
    pub fn log(&self) {
        Self::log_build_info();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            command = self.command.name(),
            service = %self.settings.service_name,
            environment = %self.settings.environment,
            region = %self.settings.region,
            version = %self.build.version,
            build_time = %self.build.build_time,
            "Service configuration"
        );

        match &self.command {
            Command::Aux(args) => {
                tracing::info!(
                    target: TRACING_TARGET_CONFIG,
                    delegated = args.aws.role_arn().is_some(),
                    session_name = %args.aws.session_name,
                    connect_timeout_secs = args.aws.connect_timeout,
                    operation_timeout_secs = args.aws.operation_timeout,
                    "Cloud configuration"
                );
            }
            Command::Gateway(args) => {
                tracing::info!(
                    target: TRACING_TARGET_CONFIG,
                    aux_service_url = %args.aux_client.base_url,
                    connect_timeout_secs = args.aux_client.connect_timeout,
                    request_timeout_secs = args.aux_client.request_timeout,
                    "Auxiliary service configuration"
                );
            }
        }

        self.server.log();
        self.middleware.log();
    }

    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
