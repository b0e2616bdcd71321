//! Page/limit coercion and the paginated response envelope.
//!
//! Query parameters are never rejected: anything missing, unparseable or
//! below 1 falls back to the default.

use serde::{Deserialize, Serialize};

use crate::post::Post;

/// A coerced `(page, limit)` pair. Both are always ≥ 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Build from already-numeric values; zero coerces to the default.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page < 1 { Self::DEFAULT_PAGE } else { page },
            limit: if limit < 1 { Self::DEFAULT_LIMIT } else { limit },
        }
    }

    /// Build from raw query-string values.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            parse_positive(page).unwrap_or(Self::DEFAULT_PAGE),
            parse_positive(limit).unwrap_or(Self::DEFAULT_LIMIT),
        )
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Rows to skip: `(page - 1) * limit`, saturating at `u64::MAX`.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.parse::<u64>().ok()).filter(|v| *v >= 1)
}

/// `ceil(total / limit)`; zero when `limit` is zero.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// One page of posts plus the metadata the client needs to page further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPage {
    pub data: Vec<Post>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl NewsPage {
    pub fn new(data: Vec<Post>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            page: request.page(),
            limit: request.limit(),
            total,
            total_pages: total_pages(total, request.limit()),
        }
    }
}
