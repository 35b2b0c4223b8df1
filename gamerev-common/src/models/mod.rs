//! Document models and schema validation
//!
//! Incoming JSON is cast to the schema, unknown fields are dropped and a
//! client-supplied `_id` is ignored. Validation errors are collected per
//! field and reported together, e.g.
//! `Game validation failed: title: Path `title` is required.`

pub mod cast;
mod game;
mod rating;

pub use game::Game;
pub use rating::{Rating, RatingWithGame};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Lower bound for any `rating` field
pub const RATING_MIN: f64 = 0.0;

/// Upper bound for any `rating` field
pub const RATING_MAX: f64 = 10.0;

/// A schema-validated document stored in a collection
pub trait Document: Serialize + DeserializeOwned + Sized {
    /// Model name used in messages ("Game", "Rating")
    const LABEL: &'static str;

    fn id(&self) -> &str;

    /// Cast and validate client input into a document with the given id
    fn from_input(id: String, input: &Value) -> Result<Self>;

    /// Stored representation: the document without `_id`
    fn to_document(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(mut map) => {
                map.remove("_id");
                Ok(map)
            }
            _ => Err(Error::Internal(format!(
                "{} did not serialize to an object",
                Self::LABEL
            ))),
        }
    }

    /// Rebuild a document from its stored form plus `_id`
    fn from_stored(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Apply a partial update and re-validate the result
    fn merged(&self, patch: &Value) -> Result<Self> {
        let patch = input_object(Self::LABEL, patch)?;
        let mut current = self.to_document()?;
        for (key, value) in patch {
            current.insert(key, value);
        }
        Self::from_input(self.id().to_string(), &Value::Object(current))
    }
}

/// Client input as an object, without the fields clients may not set
pub(crate) fn input_object(label: &str, input: &Value) -> Result<Map<String, Value>> {
    match input {
        Value::Object(map) => {
            let mut map = map.clone();
            map.remove("_id");
            map.remove("__v");
            Ok(map)
        }
        _ => Err(Error::Validation(format!(
            "{} validation failed: body must be a JSON object",
            label
        ))),
    }
}

/// Cast input into the model's loosely typed field set
pub(crate) fn cast_input<T: DeserializeOwned>(label: &str, input: &Value) -> Result<T> {
    let object = input_object(label, input)?;
    serde_json::from_value(Value::Object(object))
        .map_err(|e| Error::Validation(format!("{} validation failed: {}", label, e)))
}

/// Per-field validation error collector
#[derive(Debug, Default)]
pub(crate) struct Violations {
    errors: Vec<String>,
}

impl Violations {
    /// Required non-blank string
    pub fn required(&mut self, path: &str, value: Option<String>) -> String {
        match value {
            Some(s) if !s.trim().is_empty() => s,
            _ => {
                self.errors
                    .push(format!("{}: Path `{}` is required.", path, path));
                String::new()
            }
        }
    }

    /// Optional number within the rating bounds
    pub fn rating(&mut self, path: &str, value: Option<f64>) -> Option<f64> {
        if let Some(n) = value {
            if n < RATING_MIN {
                self.errors.push(format!(
                    "{}: Path `{}` ({}) is less than minimum allowed value ({}).",
                    path, path, n, RATING_MIN
                ));
            } else if n > RATING_MAX {
                self.errors.push(format!(
                    "{}: Path `{}` ({}) is more than maximum allowed value ({}).",
                    path, path, n, RATING_MAX
                ));
            }
        }
        value
    }

    pub fn push(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn finish(self, label: &str) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "{} validation failed: {}",
                label,
                self.errors.join(", ")
            )))
        }
    }
}

/// Drop empty strings from optional text fields
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
