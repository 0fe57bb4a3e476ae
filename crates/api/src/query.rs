//! Shared query parameter types for API handlers.

use serde::Deserialize;
use warden_core::error::CoreError;
use warden_core::page::PageRequest;

/// Generic pagination parameters (`?top=&skip=`).
///
/// Used by any handler that supports paginated listing. Validation and
/// defaults live in [`PageRequest`].
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub top: Option<i64>,
    pub skip: Option<i64>,
}

impl PaginationParams {
    /// Validate into a [`PageRequest`], rejecting out-of-range values.
    pub fn validate(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(self.top, self.skip)
    }
}
