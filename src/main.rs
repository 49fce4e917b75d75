//! Carta server entry point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use carta::api::{self, AppState};
use carta::auth::AuthService;
use carta::core::config::Config;
use carta::core::menu::MenuService;
use carta::git::{Gateway, WorkdirLock};

/// Carta - git-backed menu store and admin API
#[derive(Parser, Debug)]
#[command(name = "carta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let loaded = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let config = loaded.config;
    tracing::info!(path = %loaded.path.display(), "loaded configuration");

    // One server per working copy.
    let _lock = WorkdirLock::acquire(&config.repository.clone_dir)
        .context("failed to lock the working copy")?;

    let gateway_config = config.gateway_config();
    let gateway = tokio::task::spawn_blocking(move || Gateway::initialize(gateway_config))
        .await
        .context("gateway initialization task failed")?
        .context("failed to initialize the repository gateway")?;

    let auth = AuthService::new(
        &config.admin.username,
        &config.admin.password,
        &config.admin.email,
        Duration::from_secs(config.auth.session_ttl_secs),
    )
    .context("failed to initialize authentication")?;

    let service = Arc::new(MenuService::new(gateway));
    let state = AppState::new(service.clone(), Arc::new(auth));
    let app = api::router(state, &config.server.allowed_origins);

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!(host = %config.server.host, port = config.server.port, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // In-flight transactions hold the gateway lock; close() waits its turn.
    tokio::task::spawn_blocking(move || service.close())
        .await
        .context("shutdown task failed")?;
    tracing::info!("repository gateway closed");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to install shutdown handler; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
