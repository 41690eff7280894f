//! Data models for the catalog

pub mod author;
pub mod book;
pub mod borrow;

use serde::Deserialize;
use validator::Validate;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use borrow::Borrow;

/// Offset pagination shared by every list operation
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct ListParams {
    #[validate(range(min = 0, message = "skip must not be negative"))]
    pub skip: Option<i64>,
    #[validate(range(min = 0, message = "limit must not be negative"))]
    pub limit: Option<i64>,
}

impl ListParams {
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}
