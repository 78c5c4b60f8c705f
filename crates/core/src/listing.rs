//! Listing parameters for the record explorer (filter, sort, paginate).
//!
//! Query-string input arrives as a [`ListQuery`] with every field optional.
//! [`ListQuery::validate`] applies defaults and rejects out-of-range paging
//! values, producing a [`ListParams`]. [`RecordFilter::from_params`] then
//! turns the loosely-specified filter strings into typed predicates; values
//! that fail to parse simply produce no predicate.

use serde::{Deserialize, Serialize};

use crate::date_range::{self, DateInterval};
use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page used when the request omits `page`.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the request omits `limit`.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns the listing can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Id,
    Name,
    Category,
    Status,
    Price,
    #[default]
    CreatedAt,
}

impl SortColumn {
    /// The `records` column this variant orders by.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Category => "category",
            Self::Status => "status",
            Self::Price => "price",
            Self::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSort {
    pub column: SortColumn,
    pub order: SortOrder,
}

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Raw listing parameters as they arrive in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<SortColumn>,
    pub sort_order: Option<SortOrder>,
    pub search: Option<String>,
    pub category_filter: Option<String>,
    pub status_filter: Option<String>,
    pub price_range: Option<String>,
    pub date_range: Option<String>,
}

/// Validated listing parameters with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub sort: RecordSort,
    pub search: Option<String>,
    pub category_filter: Option<String>,
    pub status_filter: Option<String>,
    pub price_range: Option<String>,
    pub date_range: Option<String>,
}

impl ListQuery {
    /// Apply defaults and check paging bounds.
    ///
    /// Out-of-range values are rejected, never clamped. Empty filter strings
    /// are normalized to `None`; whitespace is kept and filtered on as-is.
    pub fn validate(self) -> Result<ListParams, CoreError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(CoreError::Validation("page must be >= 1".into()));
        }

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if limit < 1 {
            return Err(CoreError::Validation("limit must be >= 1".into()));
        }
        if limit > MAX_LIMIT {
            return Err(CoreError::Validation(format!(
                "limit must be <= {MAX_LIMIT}"
            )));
        }

        Ok(ListParams {
            page,
            limit,
            sort: RecordSort {
                column: self.sort_by.unwrap_or_default(),
                order: self.sort_order.unwrap_or_default(),
            },
            search: non_empty(self.search),
            category_filter: non_empty(self.category_filter),
            status_filter: non_empty(self.status_filter),
            price_range: non_empty(self.price_range),
            date_range: non_empty(self.date_range),
        })
    }
}

impl ListParams {
    /// Number of rows to skip before the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Inclusive price bounds parsed from `"<min>-<max>"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Parse `"<min>-<max>"`.
    ///
    /// Anything other than exactly two finite numbers separated by a single
    /// dash yields `None`, which callers treat as "no price filter".
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split('-');
        let min = parts.next()?.trim().parse::<f64>().ok()?;
        let max = parts.next()?.trim().parse::<f64>().ok()?;
        if parts.next().is_some() || !min.is_finite() || !max.is_finite() {
            return None;
        }
        Some(Self { min, max })
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// The conjunction of every active predicate for one listing request.
///
/// A `None` field applies no restriction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Case-insensitive substring of `name`.
    pub search: Option<String>,
    /// Case-insensitive exact match on `category`.
    pub category: Option<String>,
    /// Case-insensitive exact match on `status`.
    pub status: Option<String>,
    pub price: Option<PriceRange>,
    pub created: Option<DateInterval>,
}

impl RecordFilter {
    /// Build the filter for `params`, resolving date tokens against `now`.
    pub fn from_params(params: &ListParams, now: Timestamp) -> Self {
        Self {
            search: params.search.clone(),
            category: params.category_filter.clone(),
            status: params.status_filter.clone(),
            price: params.price_range.as_deref().and_then(PriceRange::parse),
            created: params
                .date_range
                .as_deref()
                .and_then(|token| date_range::resolve(token, now)),
        }
    }
}

// ---------------------------------------------------------------------------
// Page metadata
// ---------------------------------------------------------------------------

/// Number of pages needed to show `total` rows, `limit` per page.
///
/// Zero rows means zero pages. `limit` is validated to be at least 1 before
/// this is called; a non-positive value also yields zero.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
