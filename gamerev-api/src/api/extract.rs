//! Extractors whose rejections use the API's JSON error body

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use gamerev_common::query::ListParams;
use serde_json::Value;

use crate::error::ApiError;

/// JSON request body of any shape
///
/// Malformed JSON or a missing `Content-Type` becomes a 400.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// List parameters from the query string
pub struct ListParamsQuery(pub ListParams);

#[async_trait]
impl<S> FromRequestParts<S> for ListParamsQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<ListParams>::from_request_parts(parts, state).await {
            Ok(Query(params)) => Ok(ListParamsQuery(params)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}
