//! Game document operations

use serde_json::Value;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::documents::GAMES;
use crate::id::short_id;
use crate::models::{Document, Game};
use crate::query::{Filter, ListQuery};
use crate::Result;

/// Validate client input and store it as a new game
pub async fn create_game(pool: &SqlitePool, input: &Value) -> Result<Game> {
    let game = Game::from_input(short_id(), input)?;
    GAMES.insert(pool, &game.id, &game.to_document()?).await?;
    debug!(id = %game.id, title = %game.title, "Created game");
    Ok(game)
}

pub async fn get_game(pool: &SqlitePool, id: &str) -> Result<Option<Game>> {
    GAMES
        .find_by_id(pool, id)
        .await?
        .map(Game::from_stored)
        .transpose()
}

/// One page of games with the projection applied, plus the total match count
pub async fn list_games(pool: &SqlitePool, query: &ListQuery) -> Result<(Vec<Value>, i64)> {
    let docs = GAMES
        .find(pool, &query.filter, &query.sort, query.skip(), query.limit)
        .await?;
    let total = GAMES.count(pool, &query.filter).await?;

    let games = docs
        .into_iter()
        .map(|doc| query.projection.apply(doc))
        .collect();

    Ok((games, total))
}

/// Merge `patch` into a stored game; `None` when the game does not exist
pub async fn update_game(pool: &SqlitePool, id: &str, patch: &Value) -> Result<Option<Game>> {
    let Some(current) = get_game(pool, id).await? else {
        return Ok(None);
    };

    let updated = current.merged(patch)?;
    if !GAMES.replace(pool, id, &updated.to_document()?).await? {
        return Ok(None);
    }

    debug!(id = %id, "Updated game");
    Ok(Some(updated))
}

/// Delete a game; `false` when it did not exist. Ratings are left in place.
pub async fn delete_game(pool: &SqlitePool, id: &str) -> Result<bool> {
    Ok(GAMES.delete_by_id(pool, id).await?.is_some())
}

pub async fn delete_all_games(pool: &SqlitePool) -> Result<u64> {
    GAMES.delete_all(pool).await
}

pub async fn count_games(pool: &SqlitePool) -> Result<i64> {
    GAMES.count(pool, &Filter::new()).await
}
