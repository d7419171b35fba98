//! Pagination related types for list endpoints.
//!
//! Every paged query in the system goes through [`PageRequest`] and returns a
//! [`Page`], so offset arithmetic and metadata derivation live in exactly one
//! place.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Pagination parameters for list endpoints (1-indexed page).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Create a new page request, clamping out-of-range values.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// Validate and sanitize pagination parameters.
    pub fn validate(self) -> Self {
        Self::new(self.page, self.limit)
    }

    /// Offset for SQL queries.
    pub fn offset_i64(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * (self.limit as i64)
    }

    /// Limit for SQL queries.
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }
}

/// Metadata describing one page of a larger result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number
    pub current_page: u32,

    /// Items per page
    pub items_per_page: u32,

    /// Total number of items across all pages
    pub total_items: u64,

    /// Total number of pages (0 when the result set is empty)
    pub total_pages: u32,

    /// Whether a later page exists
    pub has_next_page: bool,

    /// Whether an earlier page exists
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Derive page metadata from the request and the total item count.
    pub fn compute(request: PageRequest, total_items: u64) -> Self {
        let total_pages = Self::total_pages(total_items, request.limit);
        Self {
            current_page: request.page,
            items_per_page: request.limit,
            total_items,
            total_pages,
            has_next_page: request.page < total_pages,
            has_previous_page: request.page > 1,
        }
    }

    fn total_pages(total_items: u64, limit: u32) -> u32 {
        if total_items == 0 {
            return 0;
        }
        // ceil(total / limit) in integer arithmetic
        ((total_items + limit as u64 - 1) / limit as u64) as u32
    }
}

/// One page of results plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Assemble a page from fetched items and the total count.
    pub fn new(data: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            data,
            meta: PageMeta::compute(request, total_items),
        }
    }

    /// Transform the items while keeping the metadata intact.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page_metadata() {
        let meta = PageMeta::compute(PageRequest::new(2, 10), 25);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.items_per_page, 10);
        assert_eq!(meta.total_items, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn empty_result_set() {
        let meta = PageMeta::compute(PageRequest::new(1, 10), 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn last_page_has_no_next() {
        let meta = PageMeta::compute(PageRequest::new(3, 10), 25);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn exact_multiple_of_limit() {
        let meta = PageMeta::compute(PageRequest::new(2, 10), 20);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next_page);
    }

    #[test]
    fn request_clamps_page_and_limit() {
        let request = PageRequest::new(0, 1000);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 100);

        let request = PageRequest { page: 0, limit: 0 }.validate();
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 1);
    }

    #[test]
    fn offset_for_sql() {
        assert_eq!(PageRequest::new(1, 10).offset_i64(), 0);
        assert_eq!(PageRequest::new(3, 10).offset_i64(), 20);
    }

    #[test]
    fn page_map_keeps_meta() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(1, 3), 7);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.data, vec!["1", "2", "3"]);
        assert_eq!(mapped.meta.total_items, 7);
        assert_eq!(mapped.meta.total_pages, 3);
    }
}
