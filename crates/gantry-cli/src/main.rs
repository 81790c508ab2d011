#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use gantry_server::handler::{auxiliary_routes, gateway_routes};
use gantry_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};

use crate::config::{Cli, Command, MiddlewareConfig, create_auxiliary_state, create_gateway_state};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "gantry_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "gantry_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "gantry_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "Application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        let message = format!("{error:#}");
        let server_error = error.downcast_ref::<server::ServerError>();

        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %message,
            code = server_error.map(server::ServerError::error_code),
            suggestion = server_error.and_then(server::ServerError::suggestion),
            "Application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    cli.telemetry.init_tracing(&cli.settings);

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        command = cli.command.name(),
        version = env!("CARGO_PKG_VERSION"),
        "Starting gantry"
    );

    cli.log();
    cli.validate()?;

    let routes = match &cli.command {
        Command::Aux(args) => {
            let state = create_auxiliary_state(&cli.settings, &cli.build, &args.aws)
                .await
                .context("failed to create auxiliary service state")?;
            auxiliary_routes(state)
        }
        Command::Gateway(args) => {
            let state = create_gateway_state(&cli.settings, &cli.build, &args.aux_client)
                .context("failed to create gateway service state")?;
            gateway_routes(state)
        }
    };

    let router = create_router(routes, &cli.middleware);
    server::serve(router, cli.server).await?;

    Ok(())
}

/// Applies all middleware layers to the service routes.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces the request deadline
/// 2. Observability - request IDs and tracing spans
/// 3. Security - CORS
/// 4. Routes (innermost) - actual request handlers
fn create_router(routes: Router, middleware: &MiddlewareConfig) -> Router {
    routes
        .with_cors(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
