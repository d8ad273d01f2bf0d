//! Paged result envelope shared by list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const MAX_PAGE_SIZE: u64 = 100;
const DEFAULT_PAGE_SIZE: u64 = 10;

/// Pagination query parameters (1-based page numbering).
///
/// Out-of-range values are clamped rather than rejected: page numbers
/// below 1 become 1, page sizes are forced into 1..=100.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Current page number (1-based)
    pub page_number: Option<u64>,
    /// Number of items per page (1-100, default 10)
    pub page_size: Option<u64>,
}

impl PaginationParams {
    pub fn page_number(&self) -> u64 {
        self.page_number.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of items to skip for the current page.
    pub fn skip(&self) -> u64 {
        (self.page_number() - 1) * self.page_size()
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page_number: Some(1),
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

/// A single page of results plus the pagination bookkeeping clients
/// need to render pagers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total_count: u64,
    /// Current page number (1-based)
    pub page_number: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, page_number: u64, page_size: u64) -> Self {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);
        let total_pages = if total_count > 0 {
            total_count.div_ceil(page_size)
        } else {
            0
        };

        Self {
            items,
            total_count,
            page_number,
            page_size,
            total_pages,
            has_previous_page: page_number > 1,
            has_next_page: page_number < total_pages,
        }
    }

    /// A page with no items.
    pub fn empty(page_number: u64, page_size: u64) -> Self {
        Self::new(Vec::new(), 0, page_number, page_size)
    }
}
