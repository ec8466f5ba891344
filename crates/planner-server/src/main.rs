//! planner-server - Conference planner front end
//!
//! Serves the conference schedule and "my agenda" pages over HTTP, backed by
//! the conference back-end API.

use anyhow::Context;
use clap::Parser;
use planner_core::{HttpApiClient, PolicyAuthorizationService};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod error;
mod middleware;
mod routes;
mod state;

/// Command-line flags
#[derive(Debug, Parser)]
#[command(name = "planner-server", version, about)]
struct Cli {
    /// Config file (defaults to ~/.conference-planner/config.toml)
    #[arg(long, env = "PLANNER_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the config file
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("planner_server=info".parse()?))
        .init();

    info!("planner-server v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    // Load configuration
    let mut config = config::Config::load(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }
    let api = HttpApiClient::with_timeout(
        &config.api.url,
        Duration::from_secs(config.api.timeout_secs),
    )
    .context("Failed to create back-end API client")?;
    info!("Using back-end API at {}", api.base_url());

    let authorization = PolicyAuthorizationService::admin(
        config.auth.admin_role.as_deref(),
        config.auth.admin_users.clone(),
    );

    let listen = config.server.listen;
    let state = state::AppState::new(config, Arc::new(api), Arc::new(authorization));
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {}", listen))?;
    info!("Listening on http://{}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

/// Resolve on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
