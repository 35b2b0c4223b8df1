//! gamerev-seed - load the sample games and ratings

use anyhow::{Context, Result};
use clap::Parser;
use gamerev_api::cli::{init_tracing, ServiceArgs};
use gamerev_api::seed::seed_database;
use gamerev_common::config::ServiceConfig;
use gamerev_common::db::init_database;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gamerev-seed")]
#[command(about = "Replace the gamerev database contents with sample data")]
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
    info!("Seeding {}", config.database_path.display());

    let pool = init_database(&config.database_path)
        .await
        .context("Failed to open database")?;

    let summary = seed_database(&pool).await.context("Error seeding database")?;
    pool.close().await;

    info!(
        "Sample data created successfully: {} games, {} ratings",
        summary.games, summary.ratings
    );
    Ok(())
}
