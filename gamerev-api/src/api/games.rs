//! Game endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gamerev_common::db::games;
use gamerev_common::models::Game;
use gamerev_common::pagination::calculate_pagination;
use gamerev_common::query::ListQuery;
use serde_json::{json, Value};
use tracing::info;

use super::{JsonBody, ListParamsQuery};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

fn game_not_found() -> ApiError {
    ApiError::NotFound("Game not found".to_string())
}

/// GET /api/games
///
/// Query parameters: `genre`, `minRating`, `maxRating`, `sort`, `select`,
/// `exclude`, `page`, `limit`.
pub async fn list_games(
    State(state): State<AppState>,
    ListParamsQuery(params): ListParamsQuery,
) -> ApiResult<Json<Value>> {
    let query = ListQuery::for_games(&params)?;
    let (docs, total) = games::list_games(&state.db, &query).await?;

    Ok(Json(json!({
        "games": docs,
        "pagination": calculate_pagination(total, query.page, query.limit),
    })))
}

/// GET /api/games/:id
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Game>> {
    games::get_game(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(game_not_found)
}

/// POST /api/games
pub async fn create_game(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<Game>)> {
    let game = games::create_game(&state.db, &body).await?;
    info!(id = %game.id, title = %game.title, "Game created");
    Ok((StatusCode::CREATED, Json(game)))
}

/// PUT /api/games/:id
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<Game>> {
    games::update_game(&state.db, &id, &body)
        .await?
        .map(Json)
        .ok_or_else(game_not_found)
}

/// DELETE /api/games/:id
///
/// Ratings that reference the game are left in place.
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    if !games::delete_game(&state.db, &id).await? {
        return Err(game_not_found());
    }
    info!(id = %id, "Game deleted");
    Ok(Json(json!({ "message": "Game deleted" })))
}
