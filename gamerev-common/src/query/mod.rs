//! Query-string to store query translation
//!
//! Turns `?genre=&minRating=&maxRating=&sort=&select=&exclude=&page=&limit=`
//! into a [`ListQuery`]: filter, sort, projection and pagination.
//!
//! Unrecognized parameters are ignored, as are numeric filters that do not
//! parse. Defaults apply when a parameter is absent.

mod filter;
mod projection;
mod sort;

pub use filter::{Condition, Filter};
pub use projection::Projection;
pub use sort::{Sort, SortKey, SortOrder};

use serde::Deserialize;

use crate::pagination::{self, DEFAULT_LIMIT, MAX_LIMIT};
use crate::{Error, Result};

/// Raw list parameters as they arrive on the URL
///
/// Every field is kept as a string so malformed values never reject the
/// whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub genre: Option<String>,
    #[serde(rename = "minRating")]
    pub min_rating: Option<String>,
    #[serde(rename = "maxRating")]
    pub max_rating: Option<String>,
    #[serde(rename = "gameId")]
    pub game_id: Option<String>,
    #[serde(rename = "hasText")]
    pub has_text: Option<String>,
    pub sort: Option<String>,
    pub select: Option<String>,
    pub exclude: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Fully parsed list query
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: Filter,
    pub sort: Sort,
    pub projection: Projection,
    pub page: i64,
    pub limit: i64,
}

impl ListQuery {
    /// Query for `GET /api/games`
    pub fn for_games(params: &ListParams) -> Result<Self> {
        let mut filter = Filter::new();

        if let Some(genre) = non_blank(&params.genre) {
            filter.push(Condition::Contains {
                field: "genre".to_string(),
                needle: genre.to_string(),
            });
        }
        push_rating_range(&mut filter, params);

        Self::finish(filter, params, Sort::asc("title"))
    }

    /// Query for `GET /api/ratings`
    pub fn for_ratings(params: &ListParams) -> Result<Self> {
        let mut filter = Filter::new();

        push_rating_range(&mut filter, params);

        if let Some(game_id) = non_blank(&params.game_id) {
            filter.push(Condition::Equals {
                field: "gameId".to_string(),
                value: game_id.to_string(),
            });
        }

        if let Some(has_text) = non_blank(&params.has_text) {
            let field = "ratingText".to_string();
            filter.push(if has_text == "true" {
                Condition::NotBlank { field }
            } else {
                Condition::Blank { field }
            });
        }

        Self::finish(filter, params, Sort::desc("rating"))
    }

    fn finish(filter: Filter, params: &ListParams, default_sort: Sort) -> Result<Self> {
        let sort = match non_blank(&params.sort) {
            Some(spec) => Sort::parse(spec)?.unwrap_or(default_sort),
            None => default_sort,
        };

        let projection =
            Projection::parse(params.select.as_deref(), params.exclude.as_deref())?;

        let page = parse_positive_int(&params.page).unwrap_or(1);
        let limit = parse_positive_int(&params.limit)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);

        Ok(Self {
            filter,
            sort,
            projection,
            page,
            limit,
        })
    }

    /// Documents to skip before this page
    pub fn skip(&self) -> i64 {
        pagination::offset(self.page, self.limit)
    }
}

fn push_rating_range(filter: &mut Filter, params: &ListParams) {
    let min = parse_number(&params.min_rating);
    let max = parse_number(&params.max_rating);
    if min.is_some() || max.is_some() {
        filter.push(Condition::Range {
            field: "rating".to_string(),
            min,
            max,
        });
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number(value: &Option<String>) -> Option<f64> {
    non_blank(value)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Integer parameter; fractional input is truncated, non-positive is rejected
fn parse_positive_int(value: &Option<String>) -> Option<i64> {
    let s = non_blank(value)?;
    let n = s
        .parse::<i64>()
        .ok()
        .or_else(|| parse_number(value).map(|f| f.trunc() as i64))?;
    (n > 0).then_some(n)
}

/// Field names usable in sort and projection specs
///
/// Letters, digits, `_`, and `.` between path segments; must not start with
/// a digit.
pub fn validate_field(field: &str) -> Result<()> {
    let valid = !field.is_empty()
        && field.len() < 100
        && field.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("Invalid field: {}", field)))
    }
}
