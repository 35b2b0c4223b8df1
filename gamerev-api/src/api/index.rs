//! Liveness banners and the JSON 404 fallback

use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;

/// GET /
pub async fn root_index() -> Json<Value> {
    Json(json!({
        "message": "API is running",
        "success": true,
    }))
}

/// GET /api
pub async fn api_index() -> Json<Value> {
    Json(json!({
        "message": "GET - Request made",
        "success": true,
    }))
}

/// Any unmatched route
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
