//! Integration tests for gamerev-api endpoints
//!
//! Tests cover:
//! - Root, `/api`, health and build info banners
//! - Game CRUD with validation and 404 handling
//! - Game list filtering, sorting, projection and pagination
//! - Rating CRUD, population of `gameId`, per-game listing
//! - Error bodies and CORS headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method
use gamerev_api::{build_router, AppState};
use gamerev_common::db::init_memory_database;

/// Test helper: fresh in-memory store
async fn setup_test_db() -> SqlitePool {
    init_memory_database()
        .await
        .expect("Should create in-memory database")
}

/// Test helper: router with the default CORS origins
fn setup_app(db: SqlitePool) -> axum::Router {
    let state = AppState::new(db, vec!["http://localhost:5173".to_string()]);
    build_router(state)
}

/// Test helper: request without a body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: request with a JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: send a request and return status plus parsed body
async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

/// Test helper: create a game through the API and return its `_id`
async fn create_game(app: &axum::Router, body: Value) -> String {
    let (status, game) = send(app, json_request("POST", "/api/games", body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", game);
    game["_id"].as_str().unwrap().to_string()
}

/// Test helper: the three games used by list tests
async fn seed_games(app: &axum::Router) -> Vec<String> {
    let mut ids = Vec::new();
    for body in [
        json!({"title": "Action Game", "genre": "Action", "rating": 9.5, "platform": ["PC"], "developer": "Studio A"}),
        json!({"title": "RPG Game", "genre": "RPG", "rating": 8.0, "platform": ["Console"], "developer": "Studio B"}),
        json!({"title": "Indie Game", "genre": "Action", "rating": 7.5, "platform": ["Mobile"], "developer": "Studio C"}),
    ] {
        ids.push(create_game(app, body).await);
    }
    ids
}

// =============================================================================
// Banners
// =============================================================================

#[tokio::test]
async fn test_root_and_api_index() {
    let app = setup_app(setup_test_db().await);

    let (status, body) = send(&app, test_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "API is running", "success": true}));

    let (status, body) = send(&app, test_request("GET", "/api")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "GET - Request made", "success": true}));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(setup_test_db().await);

    let (status, body) = send(&app, test_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "gamerev-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = setup_app(setup_test_db().await);

    let (status, body) = send(&app, test_request("GET", "/api/buildinfo")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = setup_app(setup_test_db().await);

    let (status, body) = send(&app, test_request("GET", "/api/consoles")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// =============================================================================
// Games
// =============================================================================

#[tokio::test]
async fn test_create_and_get_game() {
    let app = setup_app(setup_test_db().await);

    let id = create_game(
        &app,
        json!({
            "title": "Hades",
            "genre": "Roguelike",
            "platform": "PC",
            "releaseDate": "2020-09-17",
            "rating": "9.3",
        }),
    )
    .await;
    assert_eq!(id.len(), 8);

    let (status, game) = send(&app, test_request("GET", &format!("/api/games/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["title"], "Hades");
    assert_eq!(game["platform"], json!(["PC"]));
    assert_eq!(game["rating"], 9.3);
    assert_eq!(game["releaseDate"], "2020-09-17T00:00:00.000Z");
}

#[tokio::test]
async fn test_create_game_validation_error() {
    let app = setup_app(setup_test_db().await);

    let (status, body) = send(
        &app,
        json_request("POST", "/api/games", json!({"genre": "Action", "platform": ["PC"]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("title"), "unexpected message: {}", message);
}

#[tokio::test]
async fn test_create_game_rejects_out_of_range_rating() {
    let app = setup_app(setup_test_db().await);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/games",
            json!({"title": "T", "genre": "G", "platform": ["PC"], "rating": 11}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = setup_app(setup_test_db().await);

    let request = Request::builder()
        .method("POST")
        .uri("/api/games")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_missing_game_is_404() {
    let app = setup_app(setup_test_db().await);

    let (status, body) = send(&app, test_request("GET", "/api/games/nope1234")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Game not found"}));
}

#[tokio::test]
async fn test_update_game_merges_and_validates() {
    let app = setup_app(setup_test_db().await);
    let ids = seed_games(&app).await;
    let uri = format!("/api/games/{}", ids[1]);

    let (status, game) = send(&app, json_request("PUT", &uri, json!({"rating": 8.6}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["rating"], 8.6);
    assert_eq!(game["title"], "RPG Game");
    assert_eq!(game["developer"], "Studio B");

    let (status, _) = send(&app, json_request("PUT", &uri, json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        json_request("PUT", "/api/games/nope1234", json!({"rating": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Game not found");
}

#[tokio::test]
async fn test_delete_game() {
    let app = setup_app(setup_test_db().await);
    let ids = seed_games(&app).await;
    let uri = format!("/api/games/{}", ids[0]);

    let (status, body) = send(&app, test_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Game deleted"}));

    let (status, _) = send(&app, test_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Game listing
// =============================================================================

#[tokio::test]
async fn test_list_games_defaults() {
    let app = setup_app(setup_test_db().await);
    seed_games(&app).await;

    let (status, body) = send(&app, test_request("GET", "/api/games")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games"].as_array().unwrap().len(), 3);
    assert_eq!(body["games"][0]["title"], "Action Game");
    assert_eq!(
        body["pagination"],
        json!({"page": 1, "limit": 10, "total": 3, "pages": 1})
    );
}

#[tokio::test]
async fn test_list_games_filter_by_genre() {
    let app = setup_app(setup_test_db().await);
    seed_games(&app).await;

    let (status, body) = send(&app, test_request("GET", "/api/games?genre=action")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 2);
    for game in body["games"].as_array().unwrap() {
        assert_eq!(game["genre"], "Action");
    }
}

#[tokio::test]
async fn test_list_games_rating_range() {
    let app = setup_app(setup_test_db().await);
    seed_games(&app).await;

    let (_, body) = send(
        &app,
        test_request("GET", "/api/games?minRating=7.6&maxRating=9"),
    )
    .await;

    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["games"][0]["title"], "RPG Game");
}

#[tokio::test]
async fn test_list_games_ignores_unparseable_numbers() {
    let app = setup_app(setup_test_db().await);
    seed_games(&app).await;

    let (status, body) = send(
        &app,
        test_request("GET", "/api/games?minRating=abc&page=zero&limit=-4"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
}

#[tokio::test]
async fn test_list_games_sort_descending() {
    let app = setup_app(setup_test_db().await);
    seed_games(&app).await;

    let (_, body) = send(&app, test_request("GET", "/api/games?sort=-rating")).await;

    let ratings: Vec<f64> = body["games"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["rating"].as_f64().unwrap())
        .collect();
    assert_eq!(ratings, vec![9.5, 8.0, 7.5]);
}

#[tokio::test]
async fn test_list_games_select_and_exclude() {
    let app = setup_app(setup_test_db().await);
    seed_games(&app).await;

    let (_, body) = send(&app, test_request("GET", "/api/games?select=title")).await;
    let game = body["games"][0].as_object().unwrap();
    assert!(game.contains_key("title"));
    assert!(game.contains_key("_id"));
    assert!(!game.contains_key("genre"));

    let (_, body) = send(&app, test_request("GET", "/api/games?exclude=developer,rating")).await;
    let game = body["games"][0].as_object().unwrap();
    assert!(game.contains_key("title"));
    assert!(!game.contains_key("developer"));
    assert!(!game.contains_key("rating"));
}

#[tokio::test]
async fn test_list_games_pagination() {
    let app = setup_app(setup_test_db().await);
    seed_games(&app).await;

    let (_, body) = send(&app, test_request("GET", "/api/games?page=2&limit=2")).await;

    assert_eq!(body["games"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["pagination"],
        json!({"page": 2, "limit": 2, "total": 3, "pages": 2})
    );
}

#[tokio::test]
async fn test_list_huge_page_is_empty_not_an_error() {
    let app = setup_app(setup_test_db().await);
    seed_games(&app).await;

    for uri in [
        "/api/games?page=1000000000000000000",
        "/api/games?page=1e30",
        "/api/ratings?page=1000000000000000000",
    ] {
        let (status, body) = send(&app, test_request("GET", uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);

        let list = body
            .get("games")
            .or_else(|| body.get("ratings"))
            .and_then(Value::as_array)
            .unwrap();
        assert!(list.is_empty(), "{}", uri);
    }

    let (_, body) = send(&app, test_request("GET", "/api/games?page=1000000000000000000")).await;
    assert_eq!(body["pagination"]["page"], 1_000_000_000_000_000_000_i64);
    assert_eq!(body["pagination"]["total"], 3);
}

#[tokio::test]
async fn test_list_games_invalid_sort_field_is_400() {
    let app = setup_app(setup_test_db().await);

    let (status, body) = send(
        &app,
        test_request("GET", "/api/games?sort=title;DROP%20TABLE%20games"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// =============================================================================
// Ratings
// =============================================================================

#[tokio::test]
async fn test_create_rating_requires_game_id() {
    let app = setup_app(setup_test_db().await);

    for body in [json!({"rating": 5}), json!({"gameId": "", "rating": 5})] {
        let (status, body) = send(&app, json_request("POST", "/api/ratings", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "gameId is required"}));
    }
}

#[tokio::test]
async fn test_create_rating_is_not_populated() {
    let app = setup_app(setup_test_db().await);
    let ids = seed_games(&app).await;

    let (status, rating) = send(
        &app,
        json_request(
            "POST",
            "/api/ratings",
            json!({"gameId": ids[0], "rating": 9, "ratingText": "Tight controls"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rating["gameId"], ids[0].as_str());
    assert_eq!(rating["rating"], 9.0);
}

#[tokio::test]
async fn test_create_rating_out_of_range_is_400() {
    let app = setup_app(setup_test_db().await);
    let ids = seed_games(&app).await;

    let (status, _) = send(
        &app,
        json_request("POST", "/api/ratings", json!({"gameId": ids[0], "rating": -1})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rating_lifecycle() {
    let app = setup_app(setup_test_db().await);
    let ids = seed_games(&app).await;

    let (_, created) = send(
        &app,
        json_request("POST", "/api/ratings", json!({"gameId": ids[1], "rating": 6})),
    )
    .await;
    let uri = format!("/api/ratings/{}", created["_id"].as_str().unwrap());

    let (status, rating) = send(&app, test_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rating["gameId"]["title"], "RPG Game");

    let (status, rating) = send(
        &app,
        json_request("PUT", &uri, json!({"ratingText": "Slow start, great ending"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rating["rating"], 6.0);
    assert_eq!(rating["ratingText"], "Slow start, great ending");

    let (status, body) = send(&app, test_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Rating deleted"}));

    let (status, body) = send(&app, test_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Rating not found"}));
}

#[tokio::test]
async fn test_list_ratings_and_by_game() {
    let app = setup_app(setup_test_db().await);
    let ids = seed_games(&app).await;

    for (game, score, text) in [
        (&ids[0], 10, "Great"),
        (&ids[0], 8, ""),
        (&ids[2], 6, "Short"),
    ] {
        send(
            &app,
            json_request(
                "POST",
                "/api/ratings",
                json!({"gameId": game, "rating": score, "ratingText": text}),
            ),
        )
        .await;
    }

    let (status, body) = send(&app, test_request("GET", "/api/ratings")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["ratings"][0]["rating"], 10.0);
    assert_eq!(body["ratings"][0]["gameId"]["title"], "Action Game");

    let (_, body) = send(&app, test_request("GET", "/api/ratings?hasText=true&minRating=7")).await;
    assert_eq!(body["pagination"]["total"], 1);

    let (status, body) = send(
        &app,
        test_request("GET", &format!("/api/ratings/game/{}", ids[0])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["ratings"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, test_request("GET", "/api/ratings/game/nope1234")).await;
    assert_eq!(body, json!({"ratings": [], "count": 0}));
}

#[tokio::test]
async fn test_rating_survives_game_deletion() {
    let app = setup_app(setup_test_db().await);
    let ids = seed_games(&app).await;

    let (_, created) = send(
        &app,
        json_request("POST", "/api/ratings", json!({"gameId": ids[2], "rating": 4})),
    )
    .await;
    send(&app, test_request("DELETE", &format!("/api/games/{}", ids[2]))).await;

    let uri = format!("/api/ratings/{}", created["_id"].as_str().unwrap());
    let (status, rating) = send(&app, test_request("GET", &uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(rating["gameId"].is_null());
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = setup_app(setup_test_db().await);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/games")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let app = setup_app(setup_test_db().await);

    let request = Request::builder()
        .method("GET")
        .uri("/api/games")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
