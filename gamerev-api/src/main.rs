//! gamerev-api - games and ratings REST service

use anyhow::{Context, Result};
use clap::Parser;
use gamerev_api::api::buildinfo::BuildInfo;
use gamerev_api::cli::{init_tracing, ServiceArgs};
use gamerev_api::{build_router, AppState};
use gamerev_common::config::ServiceConfig;
use gamerev_common::db::init_database;
use tokio::signal;
use tracing::{error, info};

/// Command-line arguments for gamerev-api
#[derive(Parser, Debug)]
#[command(name = "gamerev-api")]
#[command(about = "REST API for game records and their ratings")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    service: ServiceArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ServiceConfig::resolve(cli.service.into()).context("Failed to resolve configuration")?;

    init_tracing(env!("CARGO_CRATE_NAME"), &config.log_level);

    let build = BuildInfo::current();
    info!(
        "Starting gamerev-api v{} [{}] built {} ({})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );
    info!("Database: {}", config.database_path.display());

    let pool = init_database(&config.database_path)
        .await
        .context("Failed to open database")?;

    let app = build_router(AppState::new(pool.clone(), config.cors_origins.clone()));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
