//! Page-number pagination over a fully ranked list.

use crate::error::{AppError, Result};
use crate::models::Pagination;

/// Hard ceiling on page size. Larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request: `page >= 1`, `1 <= page_size <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate raw query values.
    ///
    /// `page < 1` and `page_size < 1` are rejected; `page_size` above
    /// `max_page_size` is clamped to it.
    pub fn new(page: i64, page_size: i64, max_page_size: u32) -> Result<Self> {
        if page < 1 {
            return Err(AppError::ValidationError(format!(
                "page must be at least 1, got {}",
                page
            )));
        }
        let page = u32::try_from(page)
            .map_err(|_| AppError::ValidationError(format!("page {} is out of range", page)))?;

        if page_size < 1 {
            return Err(AppError::ValidationError(format!(
                "page_size must be at least 1, got {}",
                page_size
            )));
        }
        let max_page_size = max_page_size.max(1);
        let page_size = page_size.min(max_page_size as i64) as u32;

        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

/// Cut one page out of `items` and describe where it sits.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> (Vec<T>, Pagination) {
    let total_items = items.len() as u64;
    let page_size = request.page_size() as u64;
    let total_pages = total_items.div_ceil(page_size);

    let start = usize::try_from(request.offset())
        .unwrap_or(usize::MAX)
        .min(items.len());
    let page_items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(request.page_size() as usize)
        .collect();

    let page = request.page() as u64;
    let pagination = Pagination {
        page: request.page(),
        page_size: request.page_size(),
        total_items,
        total_pages,
        has_next: page < total_pages,
        has_previous: page > 1,
    };

    (page_items, pagination)
}
