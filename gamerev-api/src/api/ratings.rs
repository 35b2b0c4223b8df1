//! Rating endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gamerev_common::db::ratings;
use gamerev_common::models::Rating;
use gamerev_common::pagination::calculate_pagination;
use gamerev_common::query::ListQuery;
use serde_json::{json, Value};
use tracing::info;

use super::{JsonBody, ListParamsQuery};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

fn rating_not_found() -> ApiError {
    ApiError::NotFound("Rating not found".to_string())
}

/// Whether a JSON value counts as "present" for a required reference
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// GET /api/ratings
///
/// Query parameters: `gameId`, `minRating`, `maxRating`, `hasText`, `sort`,
/// `select`, `exclude`, `page`, `limit`.
pub async fn list_ratings(
    State(state): State<AppState>,
    ListParamsQuery(params): ListParamsQuery,
) -> ApiResult<Json<Value>> {
    let query = ListQuery::for_ratings(&params)?;
    let (docs, total) = ratings::list_ratings(&state.db, &query).await?;

    Ok(Json(json!({
        "ratings": docs,
        "pagination": calculate_pagination(total, query.page, query.limit),
    })))
}

/// GET /api/ratings/game/:game_id
pub async fn ratings_by_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let docs = ratings::ratings_for_game(&state.db, &game_id).await?;
    let count = docs.len();

    Ok(Json(json!({
        "ratings": docs,
        "count": count,
    })))
}

/// GET /api/ratings/:id
pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    ratings::get_rating_populated(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(rating_not_found)
}

/// POST /api/ratings
pub async fn create_rating(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<Rating>)> {
    if !is_truthy(body.get("gameId")) {
        return Err(ApiError::BadRequest("gameId is required".to_string()));
    }

    let rating = ratings::create_rating(&state.db, &body).await?;
    info!(id = %rating.id, game_id = %rating.game_id, "Rating created");
    Ok((StatusCode::CREATED, Json(rating)))
}

/// PUT /api/ratings/:id
pub async fn update_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<Rating>> {
    ratings::update_rating(&state.db, &id, &body)
        .await?
        .map(Json)
        .ok_or_else(rating_not_found)
}

/// DELETE /api/ratings/:id
pub async fn delete_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    if !ratings::delete_rating(&state.db, &id).await? {
        return Err(rating_not_found());
    }
    info!(id = %id, "Rating deleted");
    Ok(Json(json!({ "message": "Rating deleted" })))
}
