//! Database initialization
//!
//! Creates the database file (and parent directory) on first run, applies
//! connection pragmas and creates the collection tables. Safe to call on an
//! existing database.

use crate::db::documents::{GAMES, RATINGS};
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Open (creating if needed) the document database at `db_path`
///
/// Connections register the `REGEXP` operator used by substring filters.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let options = SqliteConnectOptions::from_str(&db_url)?.with_regexp();
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_collections(&pool).await?;

    Ok(pool)
}

/// Private in-memory database, used by tests and throwaway runs
///
/// Limited to one connection: every SQLite `:memory:` connection is its own
/// database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.with_regexp();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    create_collections(&pool).await?;

    Ok(pool)
}

/// Create all collection tables and indexes (idempotent)
pub async fn create_collections(pool: &SqlitePool) -> Result<()> {
    GAMES.create_table(pool).await?;
    RATINGS.create_table(pool).await?;

    // Speeds up "ratings for game" lookups and the populate join
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_ratings_game_id ON ratings (json_extract(doc, '$.gameId'))",
    )
    .execute(pool)
    .await?;

    Ok(())
}
