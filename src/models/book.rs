//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Owning author; cleared when the author is deleted
    pub author_id: Option<i64>,
    /// Copies currently lendable
    pub available_copies: i64,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[validate(range(min = 0, message = "Available copies must not be negative"))]
    pub available_copies: i64,
}

/// Update book request
///
/// `description` and `author_id` are nullable columns, so they distinguish
/// an absent field (left unchanged) from an explicit `null` (cleared).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i64>)]
    pub author_id: Option<Option<i64>>,
    #[validate(range(min = 0, message = "Available copies must not be negative"))]
    pub available_copies: Option<i64>,
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.author_id.is_none()
            && self.available_copies.is_none()
    }
}
