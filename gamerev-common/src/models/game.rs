//! Game document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{cast, cast_input, non_empty, Document, Violations};
use crate::Result;

/// A game record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "cast::opt_date")]
    pub release_date: Option<DateTime<Utc>>,
    pub platform: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Loosely typed game fields as sent by clients
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameInput {
    #[serde(default, deserialize_with = "cast::opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "cast::opt_string")]
    genre: Option<String>,
    #[serde(default, with = "cast::opt_date")]
    release_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "cast::opt_string_list")]
    platform: Option<Vec<String>>,
    #[serde(default, deserialize_with = "cast::opt_string")]
    developer: Option<String>,
    #[serde(default, deserialize_with = "cast::opt_string")]
    publisher: Option<String>,
    #[serde(default, deserialize_with = "cast::opt_number")]
    rating: Option<f64>,
    #[serde(default, deserialize_with = "cast::opt_string")]
    description: Option<String>,
}

impl Document for Game {
    const LABEL: &'static str = "Game";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_input(id: String, input: &Value) -> Result<Self> {
        let fields: GameInput = cast_input(Self::LABEL, input)?;
        let mut violations = Violations::default();

        let title = violations.required("title", fields.title);
        let genre = violations.required("genre", fields.genre);

        let platform: Vec<String> = fields
            .platform
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if platform.is_empty() {
            violations.push("platform: Path `platform` is required.".to_string());
        }

        let rating = violations.rating("rating", fields.rating);
        violations.finish(Self::LABEL)?;

        Ok(Self {
            id,
            title,
            genre,
            release_date: fields.release_date,
            platform,
            developer: non_empty(fields.developer),
            publisher: non_empty(fields.publisher),
            rating,
            description: non_empty(fields.description),
        })
    }
}
