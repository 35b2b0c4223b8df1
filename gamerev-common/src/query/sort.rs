//! Sort specifications (`sort=title`, `sort=-rating`)

use sqlx::{QueryBuilder, Sqlite};

use super::{filter::push_extract, validate_field};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub order: SortOrder,
}

/// Ordered list of sort keys; ties are always broken by `_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    keys: Vec<SortKey>,
}

impl Sort {
    pub fn asc(field: &str) -> Self {
        Self {
            keys: vec![SortKey {
                field: field.to_string(),
                order: SortOrder::Asc,
            }],
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            keys: vec![SortKey {
                field: field.to_string(),
                order: SortOrder::Desc,
            }],
        }
    }

    /// Parse `field`, `-field` or a comma-separated list of those.
    ///
    /// Returns `Ok(None)` for an empty spec so the caller can apply its default.
    pub fn parse(spec: &str) -> Result<Option<Self>> {
        let mut keys = Vec::new();
        for token in spec.split([',', ' ']).map(str::trim).filter(|t| !t.is_empty()) {
            let (field, order) = match token.strip_prefix('-') {
                Some(field) => (field, SortOrder::Desc),
                None => (token.strip_prefix('+').unwrap_or(token), SortOrder::Asc),
            };
            validate_field(field)?;
            keys.push(SortKey {
                field: field.to_string(),
                order,
            });
        }

        if keys.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Self { keys }))
        }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Append ` ORDER BY ...`
    pub fn push_order_by<'args>(
        &self,
        qb: &mut QueryBuilder<'args, Sqlite>,
        doc_column: &str,
        id_column: &str,
    ) {
        qb.push(" ORDER BY ");
        for key in &self.keys {
            if key.field == "_id" {
                qb.push(id_column);
            } else {
                push_extract(qb, doc_column, &key.field);
            }
            qb.push(" ");
            qb.push(key.order.as_sql());
            qb.push(", ");
        }

        // Tie-breaker keeps pages stable
        qb.push(format!("{} ASC", id_column));
    }
}
