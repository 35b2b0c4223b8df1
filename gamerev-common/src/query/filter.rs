//! Filter predicates over JSON documents
//!
//! Each [`Condition`] renders to a `json_extract` predicate with bound
//! parameters, so user input never reaches the SQL text.

use sqlx::{QueryBuilder, Sqlite};

/// Single predicate on one document field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Literal substring match, case-insensitive across Unicode
    Contains { field: String, needle: String },
    /// Inclusive numeric range; at least one bound is set
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Exact string equality
    Equals { field: String, value: String },
    /// Field present, not null and not the empty string
    NotBlank { field: String },
    /// Field missing, null or the empty string
    Blank { field: String },
}

/// JSON path for a (possibly dotted) field name
pub(crate) fn json_path(field: &str) -> String {
    format!("$.{}", field)
}

/// Case-insensitive pattern matching `needle` literally
///
/// Needs a connection with `REGEXP` registered (see `db::init`).
fn contains_pattern(needle: &str) -> String {
    format!("(?i){}", regex::escape(needle))
}

/// Append `json_extract(<doc_column>, ?)` with the field path bound
pub(crate) fn push_extract<'args>(
    qb: &mut QueryBuilder<'args, Sqlite>,
    doc_column: &str,
    field: &str,
) {
    qb.push(format!("json_extract({}, ", doc_column));
    qb.push_bind(json_path(field));
    qb.push(")");
}

impl Condition {
    fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>, doc_column: &str) {
        match self {
            Condition::Contains { field, needle } => {
                push_extract(qb, doc_column, field);
                qb.push(" REGEXP ");
                qb.push_bind(contains_pattern(needle));
            }
            Condition::Range { field, min, max } => {
                qb.push("(");
                let mut first = true;
                if let Some(min) = min {
                    push_extract(qb, doc_column, field);
                    qb.push(" >= ");
                    qb.push_bind(*min);
                    first = false;
                }
                if let Some(max) = max {
                    if !first {
                        qb.push(" AND ");
                    }
                    push_extract(qb, doc_column, field);
                    qb.push(" <= ");
                    qb.push_bind(*max);
                }
                qb.push(")");
            }
            Condition::Equals { field, value } => {
                push_extract(qb, doc_column, field);
                qb.push(" = ");
                qb.push_bind(value.clone());
            }
            Condition::NotBlank { field } => {
                qb.push("COALESCE(");
                push_extract(qb, doc_column, field);
                qb.push(", '') <> ''");
            }
            Condition::Blank { field } => {
                qb.push("COALESCE(");
                push_extract(qb, doc_column, field);
                qb.push(", '') = ''");
            }
        }
    }
}

/// Conjunction of conditions; empty matches every document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition (builder style)
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append ` WHERE ...` for all conditions (nothing when empty)
    pub fn push_where<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>, doc_column: &str) {
        if self.conditions.is_empty() {
            return;
        }

        qb.push(" WHERE ");
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                qb.push(" AND ");
            }
            condition.push_sql(qb, doc_column);
        }
    }
}
