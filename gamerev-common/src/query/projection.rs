//! Field projection (`select=title,rating` / `exclude=description`)
//!
//! Applied to documents after they are read. Inclusion keeps `_id` unless
//! `-_id` is listed; exclusion removes only the listed paths.

use serde_json::{Map, Value};

use super::validate_field;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Projection {
    /// Return documents unchanged
    #[default]
    All,
    /// Keep only the listed paths
    Include { fields: Vec<String>, keep_id: bool },
    /// Drop the listed paths
    Exclude(Vec<String>),
}

fn tokens(spec: &str) -> impl Iterator<Item = &str> {
    spec.split([',', ' ']).map(str::trim).filter(|t| !t.is_empty())
}

impl Projection {
    /// Build a projection from the `select` and `exclude` parameters.
    ///
    /// `select` wins when both are given. Inside `select`, `-field` tokens are
    /// exclusions; mixing them with inclusions is rejected except for `-_id`.
    pub fn parse(select: Option<&str>, exclude: Option<&str>) -> Result<Self> {
        if let Some(select) = select.filter(|s| !s.trim().is_empty()) {
            let mut included = Vec::new();
            let mut excluded = Vec::new();
            for token in tokens(select) {
                match token.strip_prefix('-') {
                    Some(field) => {
                        validate_field(field)?;
                        excluded.push(field.to_string());
                    }
                    None => {
                        let field = token.strip_prefix('+').unwrap_or(token);
                        validate_field(field)?;
                        included.push(field.to_string());
                    }
                }
            }

            if included.is_empty() {
                return Ok(Projection::Exclude(excluded));
            }

            let keep_id = !excluded.iter().any(|f| f == "_id");
            if excluded.iter().any(|f| f != "_id") {
                return Err(Error::InvalidInput(
                    "Projection cannot mix inclusion and exclusion".to_string(),
                ));
            }

            return Ok(Projection::Include {
                fields: included,
                keep_id,
            });
        }

        if let Some(exclude) = exclude.filter(|s| !s.trim().is_empty()) {
            let mut excluded = Vec::new();
            for token in tokens(exclude) {
                let field = token.strip_prefix('-').unwrap_or(token);
                validate_field(field)?;
                excluded.push(field.to_string());
            }
            return Ok(Projection::Exclude(excluded));
        }

        Ok(Projection::All)
    }

    /// Apply the projection to one document
    pub fn apply(&self, doc: Value) -> Value {
        match self {
            Projection::All => doc,
            Projection::Include { fields, keep_id } => {
                let mut out = Value::Object(Map::new());
                if *keep_id {
                    if let Some(id) = doc.get("_id") {
                        set_path(&mut out, "_id", id.clone());
                    }
                }
                for field in fields {
                    if let Some(value) = get_path(&doc, field) {
                        set_path(&mut out, field, value.clone());
                    }
                }
                out
            }
            Projection::Exclude(fields) => {
                let mut doc = doc;
                for field in fields {
                    remove_path(&mut doc, field);
                }
                doc
            }
        }
    }
}

fn get_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |current, segment| current.get(segment))
}

fn set_path(doc: &mut Value, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = doc;
    while let Some(segment) = segments.next() {
        let Value::Object(map) = current else {
            return;
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

fn remove_path(doc: &mut Value, path: &str) {
    match path.rsplit_once('.') {
        None => {
            if let Value::Object(map) = doc {
                map.remove(path);
            }
        }
        Some((parent, last)) => {
            let parent = parent
                .split('.')
                .try_fold(doc, |current, segment| current.get_mut(segment));
            if let Some(Value::Object(map)) = parent {
                map.remove(last);
            }
        }
    }
}
