//! Borrow (loan) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Textual date format accepted for return dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Borrow record from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrow {
    pub id: i64,
    pub book_id: i64,
    pub reader_name: String,
    pub borrow_date: NaiveDate,
    /// Absent while the book is still out
    pub return_date: Option<NaiveDate>,
}

impl Borrow {
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Create borrow request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBorrow {
    pub book_id: i64,
    #[validate(length(min = 1, message = "Reader name must not be empty"))]
    pub reader_name: String,
    pub borrow_date: NaiveDate,
}

/// Update borrow request
///
/// The book reference is fixed at creation and the return date only moves
/// through the return operation, so neither is accepted here.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateBorrow {
    #[validate(length(min = 1, message = "Reader name must not be empty"))]
    pub reader_name: Option<String>,
    pub borrow_date: Option<NaiveDate>,
}

impl UpdateBorrow {
    pub fn is_empty(&self) -> bool {
        self.reader_name.is_none() && self.borrow_date.is_none()
    }
}

/// Parse a return date given as `YYYY-MM-DD`
pub fn parse_return_date(value: &str) -> AppResult<NaiveDate> {
    let invalid = || {
        AppError::BadRequest(format!(
            "Invalid date format '{}'. Use 'YYYY-MM-DD'.",
            value
        ))
    };

    // chrono skips whitespace ahead of numeric fields
    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}
