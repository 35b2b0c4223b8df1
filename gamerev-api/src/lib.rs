//! gamerev-api library - games and ratings REST service
//!
//! Routes live under `/api`; `/` and `/health` are served at the root.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod api;
pub mod cli;
pub mod error;
pub mod seed;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Document store connection pool
    pub db: SqlitePool,
    /// Browser origins allowed to call the API
    pub cors_origins: Vec<String>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, cors_origins: Vec<String>) -> Self {
        Self { db, cors_origins }
    }
}

/// CORS policy: configured origins with credentials
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let games = Router::new()
        .route("/", get(api::list_games).post(api::create_game))
        .route(
            "/:id",
            get(api::get_game)
                .put(api::update_game)
                .delete(api::delete_game),
        );

    let ratings = Router::new()
        .route("/", get(api::list_ratings).post(api::create_rating))
        .route("/game/:game_id", get(api::ratings_by_game))
        .route(
            "/:id",
            get(api::get_rating)
                .put(api::update_rating)
                .delete(api::delete_rating),
        );

    let api_routes = Router::new()
        .route("/", get(api::api_index))
        .route("/buildinfo", get(api::get_build_info))
        .nest("/games", games)
        .nest("/ratings", ratings);

    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .route("/", get(api::root_index))
        .merge(api::health_routes())
        .nest("/api", api_routes)
        .fallback(api::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
