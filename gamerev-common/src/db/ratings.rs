//! Rating document operations
//!
//! Reads populate `gameId` with the referenced game through a LEFT JOIN, so a
//! rating whose game was deleted comes back with `gameId: null`.

use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use crate::db::documents::{with_id, RATINGS};
use crate::id::short_id;
use crate::models::{Document, Game, Rating};
use crate::query::ListQuery;
use crate::Result;

const POPULATED_SELECT: &str = "SELECT r.id AS id, r.doc AS doc, g.id AS game_id, g.doc AS game_doc \
     FROM ratings r LEFT JOIN games g ON g.id = json_extract(r.doc, '$.gameId')";

fn populated_row(row: &SqliteRow) -> Result<Value> {
    let rating = Rating::from_stored(with_id(row.try_get("id")?, &row.try_get::<String, _>("doc")?)?)?;

    let game_id: Option<String> = row.try_get("game_id")?;
    let game_doc: Option<String> = row.try_get("game_doc")?;
    let game = match (game_id, game_doc) {
        (Some(id), Some(doc)) => Some(Game::from_stored(with_id(id, &doc)?)?),
        _ => None,
    };

    rating.populated(game.as_ref())
}

/// Validate client input and store it as a new rating
///
/// The referenced game is not required to exist.
pub async fn create_rating(pool: &SqlitePool, input: &Value) -> Result<Rating> {
    let rating = Rating::from_input(short_id(), input)?;
    RATINGS.insert(pool, &rating.id, &rating.to_document()?).await?;
    debug!(id = %rating.id, game_id = %rating.game_id, "Created rating");
    Ok(rating)
}

/// Stored rating without population
pub async fn get_rating(pool: &SqlitePool, id: &str) -> Result<Option<Rating>> {
    RATINGS
        .find_by_id(pool, id)
        .await?
        .map(Rating::from_stored)
        .transpose()
}

/// Rating with its game populated
pub async fn get_rating_populated(pool: &SqlitePool, id: &str) -> Result<Option<Value>> {
    let mut qb = QueryBuilder::<Sqlite>::new(POPULATED_SELECT);
    qb.push(" WHERE r.id = ");
    qb.push_bind(id.to_string());

    let row = qb.build().fetch_optional(pool).await?;
    row.as_ref().map(populated_row).transpose()
}

/// One page of populated ratings with the projection applied, plus the total
pub async fn list_ratings(pool: &SqlitePool, query: &ListQuery) -> Result<(Vec<Value>, i64)> {
    let mut qb = QueryBuilder::<Sqlite>::new(POPULATED_SELECT);
    query.filter.push_where(&mut qb, "r.doc");
    query.sort.push_order_by(&mut qb, "r.doc", "r.id");
    qb.push(" LIMIT ");
    qb.push_bind(query.limit);
    qb.push(" OFFSET ");
    qb.push_bind(query.skip());

    let rows = qb.build().fetch_all(pool).await?;
    let ratings = rows
        .iter()
        .map(|row| populated_row(row).map(|doc| query.projection.apply(doc)))
        .collect::<Result<Vec<_>>>()?;

    let total = RATINGS.count(pool, &query.filter).await?;

    Ok((ratings, total))
}

/// All populated ratings for one game, in insertion order
pub async fn ratings_for_game(pool: &SqlitePool, game_id: &str) -> Result<Vec<Value>> {
    let mut qb = QueryBuilder::<Sqlite>::new(POPULATED_SELECT);
    qb.push(" WHERE json_extract(r.doc, '$.gameId') = ");
    qb.push_bind(game_id.to_string());
    qb.push(" ORDER BY r.rowid");

    let rows = qb.build().fetch_all(pool).await?;
    rows.iter().map(populated_row).collect()
}

/// Merge `patch` into a stored rating; `None` when the rating does not exist
pub async fn update_rating(pool: &SqlitePool, id: &str, patch: &Value) -> Result<Option<Rating>> {
    let Some(current) = get_rating(pool, id).await? else {
        return Ok(None);
    };

    let updated = current.merged(patch)?;
    if !RATINGS.replace(pool, id, &updated.to_document()?).await? {
        return Ok(None);
    }

    debug!(id = %id, "Updated rating");
    Ok(Some(updated))
}

pub async fn delete_rating(pool: &SqlitePool, id: &str) -> Result<bool> {
    Ok(RATINGS.delete_by_id(pool, id).await?.is_some())
}

pub async fn delete_all_ratings(pool: &SqlitePool) -> Result<u64> {
    RATINGS.delete_all(pool).await
}
