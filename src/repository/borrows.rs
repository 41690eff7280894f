//! Borrows repository for database operations
//!
//! Inserting, returning and removing a borrow always moves a copy counter
//! as well, so those steps only exist on an executor and are driven by the
//! borrow workflow inside its transaction.

use chrono::NaiveDate;
use sqlx::{SqliteExecutor, SqlitePool};

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{Borrow, CreateBorrow, UpdateBorrow},
        ListParams,
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: SqlitePool,
}

impl BorrowsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a borrow on any executor
    pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: i64) -> AppResult<Option<Borrow>> {
        let borrow = sqlx::query_as::<_, Borrow>("SELECT * FROM borrows WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(borrow)
    }

    /// Get borrow by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Borrow> {
        Self::find(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))
    }

    /// List borrows ordered by ID
    pub async fn list(&self, params: &ListParams) -> AppResult<Vec<Borrow>> {
        let borrows = sqlx::query_as::<_, Borrow>(
            "SELECT * FROM borrows ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(params.limit())
        .bind(params.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(borrows)
    }

    /// List the borrow records of a book
    pub async fn list_by_book(&self, book_id: i64, params: &ListParams) -> AppResult<Vec<Borrow>> {
        let borrows = sqlx::query_as::<_, Borrow>(
            "SELECT * FROM borrows WHERE book_id = ? ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(book_id)
        .bind(params.limit())
        .bind(params.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(borrows)
    }

    /// Count borrows not yet returned
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE return_date IS NULL")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Update reader name and/or borrow date
    pub async fn update(&self, id: i64, data: &UpdateBorrow) -> AppResult<Borrow> {
        if data.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut sets: Vec<&str> = Vec::new();
        if data.reader_name.is_some() {
            sets.push("reader_name = ?");
        }
        if data.borrow_date.is_some() {
            sets.push("borrow_date = ?");
        }

        let query = format!("UPDATE borrows SET {} WHERE id = ? RETURNING *", sets.join(", "));

        let mut builder = sqlx::query_as::<_, Borrow>(&query);
        if let Some(ref reader_name) = data.reader_name {
            builder = builder.bind(reader_name);
        }
        if let Some(borrow_date) = data.borrow_date {
            builder = builder.bind(borrow_date);
        }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))
    }

    /// Insert an active borrow record
    pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, data: &CreateBorrow) -> AppResult<Borrow> {
        let borrow = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (book_id, reader_name, borrow_date, return_date)
            VALUES (?, ?, ?, NULL)
            RETURNING *
            "#,
        )
        .bind(data.book_id)
        .bind(&data.reader_name)
        .bind(data.borrow_date)
        .fetch_one(executor)
        .await?;
        Ok(borrow)
    }

    /// Record the return date of an active borrow.
    ///
    /// Returns `None` if the borrow does not exist or was already returned.
    pub async fn mark_returned<'e, E: SqliteExecutor<'e>>(
        executor: E,
        id: i64,
        return_date: NaiveDate,
    ) -> AppResult<Option<Borrow>> {
        let borrow = sqlx::query_as::<_, Borrow>(
            r#"
            UPDATE borrows SET return_date = ?
            WHERE id = ? AND return_date IS NULL
            RETURNING *
            "#,
        )
        .bind(return_date)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(borrow)
    }

    /// Remove a borrow record, returning it as it was
    pub async fn remove<'e, E: SqliteExecutor<'e>>(executor: E, id: i64) -> AppResult<Option<Borrow>> {
        let borrow = sqlx::query_as::<_, Borrow>("DELETE FROM borrows WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(borrow)
    }

    /// Remove every borrow record of a book
    pub async fn delete_by_book<'e, E: SqliteExecutor<'e>>(executor: E, book_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM borrows WHERE book_id = ?")
            .bind(book_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
