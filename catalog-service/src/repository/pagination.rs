//! Pagination types for catalog queries
//!
//! [`PageRequest`] is what callers ask for (1-indexed page, page size),
//! [`Pagination`] is what storage executes (offset, limit) and
//! [`Page`] is what comes back.
//!
//! # Example
//!
//! ```rust
//! use catalog_service::repository::{PageMeta, PageRequest, Pagination};
//!
//! let request = PageRequest::parse(Some(3), Some(20)).unwrap();
//! assert_eq!(request.pagination(), Pagination::new(40, 20));
//!
//! let meta = PageMeta::new(request, 41);
//! assert_eq!(meta.last_page, 3);
//! ```

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offset/limit pair handed to storage
///
/// # Example
///
/// ```rust
/// use catalog_service::repository::Pagination;
///
/// let page3 = Pagination::page(3, 20); // Page 3 with 20 items per page
/// assert_eq!(page3.offset, 40); // Skip first 2 pages (40 items)
/// assert_eq!(page3.limit, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: u64,
    /// Maximum number of results to return
    pub limit: u64,
}

impl Pagination {
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Pagination for a specific page number (1-indexed)
    #[must_use]
    pub const fn page(page_number: u64, page_size: u64) -> Self {
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);
        Self {
            offset,
            limit: page_size,
        }
    }
}

/// Rejected page parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    #[error("page must be a positive number")]
    Page,
    #[error("limit must be a positive number")]
    Limit,
}

/// A caller's page request
///
/// Both values are non-zero, so `last_page` can always be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: NonZeroU64,
    pub limit: NonZeroU64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: NonZeroU64 = NonZeroU64::MIN;

    /// 10
    pub const DEFAULT_LIMIT: NonZeroU64 = NonZeroU64::MIN.saturating_add(9);

    pub const fn new(page: NonZeroU64, limit: NonZeroU64) -> Self {
        Self { page, limit }
    }

    /// Fill absent values with the defaults (page 1, limit 10)
    pub fn with_defaults(page: Option<NonZeroU64>, limit: Option<NonZeroU64>) -> Self {
        Self {
            page: page.unwrap_or(Self::DEFAULT_PAGE),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Validate caller-supplied values; absent values take the defaults
    pub fn parse(page: Option<i64>, limit: Option<i64>) -> Result<Self, PageRequestError> {
        let page = page
            .map(|p| positive(p).ok_or(PageRequestError::Page))
            .transpose()?;
        let limit = limit
            .map(|l| positive(l).ok_or(PageRequestError::Limit))
            .transpose()?;
        Ok(Self::with_defaults(page, limit))
    }

    /// Storage offset and limit for this page
    pub fn pagination(&self) -> Pagination {
        Pagination::page(self.page.get(), self.limit.get())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::with_defaults(None, None)
    }
}

fn positive(value: i64) -> Option<NonZeroU64> {
    u64::try_from(value).ok().and_then(NonZeroU64::new)
}

/// Pagination metadata returned with every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    /// Number of available products
    pub total_pages: u64,
    /// `ceil(total_pages / limit)`, 0 for an empty catalog
    pub last_page: u64,
}

impl PageMeta {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page.get(),
            limit: request.limit.get(),
            total_pages: total,
            last_page: total.div_ceil(request.limit.get()),
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}
