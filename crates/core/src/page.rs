//! Offset-based pagination, shared by the activity and blocklist listings.
//!
//! Pagination runs over a mutating dataset: inserts that land between two
//! page requests may shift later pages. That is documented behavior; a
//! single page is always internally consistent.

use serde::Serialize;

use crate::error::CoreError;

/// Default page size when the caller does not supply `top`.
pub const DEFAULT_TOP: usize = 25;

/// Hard cap on page size; larger requests are rejected.
pub const MAX_TOP: usize = 1000;

/// Validated `(top, skip)` pair.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    top: usize,
    skip: usize,
}

impl PageRequest {
    /// Validate raw query parameters, applying defaults for absent values.
    ///
    /// `top` must be in `1..=MAX_TOP`; `skip` must be non-negative.
    pub fn new(top: Option<i64>, skip: Option<i64>) -> Result<Self, CoreError> {
        let top = top.unwrap_or(DEFAULT_TOP as i64);
        let skip = skip.unwrap_or(0);

        if top <= 0 {
            return Err(CoreError::invalid_argument("top must be greater than zero"));
        }
        if top > MAX_TOP as i64 {
            return Err(CoreError::invalid_argument(format!(
                "top must be at most {MAX_TOP}"
            )));
        }
        if skip < 0 {
            return Err(CoreError::invalid_argument("skip must not be negative"));
        }

        Ok(Self {
            top: top as usize,
            skip: skip as usize,
        })
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn skip(&self) -> usize {
        self.skip
    }
}

/// One bounded slice of an ordered result set, plus continuation metadata.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    /// Size of the full result set at the time of the query.
    pub total: usize,
    pub top: usize,
    pub skip: usize,
    pub has_more: bool,
    pub next_offset: usize,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, total: usize, request: PageRequest) -> Self {
        let next_offset = request.skip().saturating_add(items.len());
        let has_more = next_offset < total;

        Self {
            items,
            total,
            top: request.top(),
            skip: request.skip(),
            has_more,
            next_offset,
        }
    }
}
