//! JSON document collections on SQLite
//!
//! Each collection is a table of `(id, doc)` rows where `doc` is the JSON
//! document without its `_id`. Reads hand back the document with `_id`
//! restored as its first key.

use serde_json::{Map, Value};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::query::{Filter, Sort};
use crate::{Error, Result};

/// The games collection
pub const GAMES: Collection = Collection::new("games");

/// The ratings collection
pub const RATINGS: Collection = Collection::new("ratings");

/// Handle to one collection table
///
/// Table names are compile-time constants, never user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    table: &'static str,
}

/// Rebuild a full document from its stored parts
pub fn with_id(id: String, doc: &str) -> Result<Value> {
    let stored: Map<String, Value> = match serde_json::from_str(doc)? {
        Value::Object(map) => map,
        _ => {
            return Err(Error::Internal(format!(
                "stored document {} is not an object",
                id
            )))
        }
    };

    let mut full = Map::with_capacity(stored.len() + 1);
    full.insert("_id".to_string(), Value::String(id));
    full.extend(stored);
    Ok(Value::Object(full))
}

impl Collection {
    pub const fn new(table: &'static str) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub async fn create_table(&self, pool: &SqlitePool) -> Result<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                doc TEXT NOT NULL CHECK (json_valid(doc)),
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            self.table
        ))
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn insert(&self, pool: &SqlitePool, id: &str, doc: &Map<String, Value>) -> Result<()> {
        sqlx::query(&format!("INSERT INTO {} (id, doc) VALUES (?, ?)", self.table))
            .bind(id)
            .bind(serde_json::to_string(doc)?)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, pool: &SqlitePool, id: &str) -> Result<Option<Value>> {
        let row: Option<(String, String)> =
            sqlx::query_as(&format!("SELECT id, doc FROM {} WHERE id = ?", self.table))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        row.map(|(id, doc)| with_id(id, &doc)).transpose()
    }

    /// Matching documents in sort order, one page at a time
    pub async fn find(
        &self,
        pool: &SqlitePool,
        filter: &Filter,
        sort: &Sort,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Value>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT id, doc FROM {}", self.table));
        filter.push_where(&mut qb, "doc");
        sort.push_order_by(&mut qb, "doc", "id");
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(skip);

        let rows = qb.build().fetch_all(pool).await?;
        rows.iter()
            .map(|row| with_id(row.try_get("id")?, &row.try_get::<String, _>("doc")?))
            .collect()
    }

    pub async fn count(&self, pool: &SqlitePool, filter: &Filter) -> Result<i64> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {}", self.table));
        filter.push_where(&mut qb, "doc");

        Ok(qb.build_query_scalar::<i64>().fetch_one(pool).await?)
    }

    /// Overwrite a document; `false` when no document has this id
    pub async fn replace(&self, pool: &SqlitePool, id: &str, doc: &Map<String, Value>) -> Result<bool> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET doc = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
            self.table
        ))
        .bind(serde_json::to_string(doc)?)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a document, returning it when it existed
    pub async fn delete_by_id(&self, pool: &SqlitePool, id: &str) -> Result<Option<Value>> {
        let row: Option<(String, String)> = sqlx::query_as(&format!(
            "DELETE FROM {} WHERE id = ? RETURNING id, doc",
            self.table
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.map(|(id, doc)| with_id(id, &doc)).transpose()
    }

    pub async fn delete_all(&self, pool: &SqlitePool) -> Result<u64> {
        let result = sqlx::query(&format!("DELETE FROM {}", self.table))
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
