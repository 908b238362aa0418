// ABOUTME: Pagination utilities for list endpoints
// ABOUTME: Standardized query parameters and response wrappers

use serde::{Deserialize, Serialize};

/// Default page size for paginated queries
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size to prevent performance issues
pub const MAX_PAGE_SIZE: i64 = 100;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: i64 = 1;

/// Query parameters for pagination
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    MIN_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Validate and normalize, returning (limit, offset) for SQL queries.
    fn validate(&self) -> (i64, i64) {
        let page = self.page.max(MIN_PAGE);
        let limit = self.limit.clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;
        (limit, offset)
    }

    pub fn limit(&self) -> i64 {
        self.validate().0
    }

    pub fn offset(&self) -> i64 {
        self.validate().1
    }

    pub fn page(&self) -> i64 {
        self.page.max(MIN_PAGE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: MIN_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Metadata about pagination state
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub page: i64,

    #[serde(rename = "pageSize")]
    pub page_size: i64,

    #[serde(rename = "totalItems")]
    pub total_items: i64,

    #[serde(rename = "totalPages")]
    pub total_pages: i64,

    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,

    #[serde(rename = "hasPreviousPage")]
    pub has_previous_page: bool,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total_items: i64) -> Self {
        let page = params.page();
        let page_size = params.limit();
        let total_pages = (total_items + page_size - 1) / page_size;

        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > MIN_PAGE,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total_items: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(params, total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: i64, limit: i64) -> PaginationParams {
        PaginationParams { page, limit }
    }

    #[test]
    fn test_default_pagination_params() {
        let p = PaginationParams::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_params_validation() {
        assert_eq!(params(-5, 10).page(), 1);
        assert_eq!(params(0, 10).offset(), 0);
        assert_eq!(params(1, 200).limit(), MAX_PAGE_SIZE);
        assert_eq!(params(1, -5).limit(), 1);
    }

    #[test]
    fn test_pagination_offset_calculation() {
        assert_eq!(params(1, 20).offset(), 0);
        assert_eq!(params(2, 20).offset(), 20);
        assert_eq!(params(3, 10).offset(), 20);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(&params(1, 20), 100);
        assert_eq!(meta.total_pages, 5);
        assert!(meta.has_next_page);
        assert!(!meta.has_previous_page);

        let last = PaginationMeta::new(&params(5, 20), 100);
        assert!(!last.has_next_page);
        assert!(last.has_previous_page);

        let partial = PaginationMeta::new(&params(1, 20), 15);
        assert_eq!(partial.total_pages, 1);
        assert!(!partial.has_next_page);
    }
}
