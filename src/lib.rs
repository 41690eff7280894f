//! Library catalog service
//!
//! Authors, books and borrow records behind a REST JSON API. Borrowing and
//! returning keep each book's `available_copies` in step with its
//! outstanding borrows.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
