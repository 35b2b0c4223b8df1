//! Rating document

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{cast, cast_input, non_empty, Document, Game, Violations};
use crate::Result;

/// A single review score for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(rename = "_id")]
    pub id: String,
    /// `_id` of the reviewed game; not checked for existence
    pub game_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A rating as returned by read endpoints, with its game populated
///
/// `game` is `None` when the referenced game no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingWithGame {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "gameId")]
    pub game: Option<Game>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingInput {
    #[serde(default, deserialize_with = "cast::opt_string")]
    game_id: Option<String>,
    #[serde(default, deserialize_with = "cast::opt_string")]
    rating_text: Option<String>,
    #[serde(default, deserialize_with = "cast::opt_number")]
    rating: Option<f64>,
}

impl Rating {
    /// JSON form with `gameId` replaced by the game document (or `null`)
    pub fn populated(&self, game: Option<&Game>) -> Result<Value> {
        let mut value = serde_json::to_value(self)?;
        let game = match game {
            Some(game) => serde_json::to_value(game)?,
            None => Value::Null,
        };
        if let Value::Object(map) = &mut value {
            map.insert("gameId".to_string(), game);
        }
        Ok(value)
    }
}

impl Document for Rating {
    const LABEL: &'static str = "Rating";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_input(id: String, input: &Value) -> Result<Self> {
        let fields: RatingInput = cast_input(Self::LABEL, input)?;
        let mut violations = Violations::default();

        let game_id = violations.required("gameId", fields.game_id);
        let rating = violations.rating("rating", fields.rating);
        violations.finish(Self::LABEL)?;

        Ok(Self {
            id,
            game_id,
            rating_text: non_empty(fields.rating_text),
            rating,
        })
    }
}
