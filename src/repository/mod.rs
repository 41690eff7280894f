//! Repository layer for database operations
//!
//! Each repository owns a handle on the pool for standalone operations.
//! Steps that must share a transaction with another repository are
//! associated functions taking any [`sqlx::SqliteExecutor`], so callers can
//! pass `&mut *tx`.

pub mod authors;
pub mod books;
pub mod borrows;

use sqlx::SqlitePool;

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: SqlitePool,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip a trivial query to check the store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
