//! Pagination utilities
//!
//! Pages are 1-indexed. `limit` is the page size requested by the caller,
//! bounded by [`MAX_LIMIT`].

use serde::{Deserialize, Serialize};

/// Page size used when the caller gives none (or an unusable one)
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a caller may request
pub const MAX_LIMIT: i64 = 100;

/// Pagination block returned alongside every list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Page size
    pub limit: i64,
    /// Number of documents matching the filter
    pub total: i64,
    /// Total number of pages
    pub pages: i64,
}

/// Calculate pagination metadata from total results, requested page and page size
///
/// The requested page is reported back as-is; a page past the end simply
/// yields no documents.
///
/// # Examples
/// ```
/// use gamerev_common::pagination::calculate_pagination;
///
/// // 25 total results at 10 per page = 3 pages (10 + 10 + 5)
/// let p = calculate_pagination(25, 2, 10);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.pages, 3);
/// ```
pub fn calculate_pagination(total: i64, page: i64, limit: i64) -> Pagination {
    let limit = limit.max(1);
    let pages = (total + limit - 1) / limit;

    Pagination {
        page,
        limit,
        total,
        pages,
    }
}

/// Number of documents to skip for a page
///
/// Saturates instead of overflowing for absurdly large pages.
pub fn offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit.max(0))
}
