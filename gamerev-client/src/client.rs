//! gamerev API client

use std::time::Duration;

use gamerev_common::models::{Game, Rating, RatingWithGame};
use gamerev_common::pagination::Pagination;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::forms::{GameForm, GameListParams, RatingForm, RatingListParams};

/// Server address used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const USER_AGENT: &str = concat!("gamerev-client/", env!("CARGO_PKG_VERSION"));

/// Page of games from `GET /api/games`
#[derive(Debug, Clone, Deserialize)]
pub struct GameList {
    pub games: Vec<Game>,
    pub pagination: Pagination,
}

/// Page of ratings from `GET /api/ratings`
#[derive(Debug, Clone, Deserialize)]
pub struct RatingList {
    pub ratings: Vec<RatingWithGame>,
    pub pagination: Pagination,
}

/// Every rating of one game from `GET /api/ratings/game/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct GameRatings {
    pub ratings: Vec<RatingWithGame>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// Thin wrapper over the REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:5000`)
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/api/<segments...>`, each segment percent-encoded
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    // Games

    pub async fn get_all_games(&self, params: &GameListParams) -> ClientResult<GameList> {
        debug!(?params, "Listing games");
        self.send(self.http_client.get(self.url(&["games"])?).query(params))
            .await
    }

    pub async fn get_game_by_id(&self, id: &str) -> ClientResult<Game> {
        self.send(self.http_client.get(self.url(&["games", id])?))
            .await
    }

    pub async fn create_game(&self, form: &GameForm) -> ClientResult<Game> {
        self.send(self.http_client.post(self.url(&["games"])?).json(form))
            .await
    }

    pub async fn update_game(&self, id: &str, form: &GameForm) -> ClientResult<Game> {
        self.send(
            self.http_client
                .put(self.url(&["games", id])?)
                .json(form),
        )
        .await
    }

    /// Returns the server's confirmation message
    pub async fn delete_game(&self, id: &str) -> ClientResult<String> {
        let body: MessageBody = self
            .send(self.http_client.delete(self.url(&["games", id])?))
            .await?;
        Ok(body.message)
    }

    // Ratings

    pub async fn get_all_ratings(&self, params: &RatingListParams) -> ClientResult<RatingList> {
        debug!(?params, "Listing ratings");
        self.send(self.http_client.get(self.url(&["ratings"])?).query(params))
            .await
    }

    pub async fn get_rating_by_id(&self, id: &str) -> ClientResult<RatingWithGame> {
        self.send(self.http_client.get(self.url(&["ratings", id])?))
            .await
    }

    pub async fn get_ratings_by_game(&self, game_id: &str) -> ClientResult<GameRatings> {
        self.send(
            self.http_client
                .get(self.url(&["ratings", "game", game_id])?),
        )
        .await
    }

    pub async fn create_rating(&self, form: &RatingForm) -> ClientResult<Rating> {
        self.send(self.http_client.post(self.url(&["ratings"])?).json(form))
            .await
    }

    pub async fn update_rating(&self, id: &str, form: &RatingForm) -> ClientResult<Rating> {
        self.send(
            self.http_client
                .put(self.url(&["ratings", id])?)
                .json(form),
        )
        .await
    }

    /// Returns the server's confirmation message
    pub async fn delete_rating(&self, id: &str) -> ClientResult<String> {
        let body: MessageBody = self
            .send(self.http_client.delete(self.url(&["ratings", id])?))
            .await?;
        Ok(body.message)
    }
}

/// Turn a non-success response into [`ClientError::Api`]
///
/// The message is taken from an `{"error": ...}` body when there is one.
async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(text);

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
