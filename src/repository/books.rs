//! Books repository for database operations

use sqlx::{SqliteExecutor, SqlitePool};

use super::borrows::BorrowsRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        ListParams,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: SqlitePool,
}

impl BooksRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a book on any executor
    pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(book)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        Self::find(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// List books ordered by ID
    pub async fn list(&self, params: &ListParams) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id LIMIT ? OFFSET ?")
            .bind(params.limit())
            .bind(params.skip())
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// List the books written by an author
    pub async fn list_by_author(&self, author_id: i64, params: &ListParams) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE author_id = ? ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(author_id)
        .bind(params.limit())
        .bind(params.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Create a book
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        Self::insert(&self.pool, data).await
    }

    /// Insert a book on any executor.
    ///
    /// An `author_id` that does not resolve is reported as `NotFound`.
    pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, data: &CreateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, description, author_id, available_copies)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.author_id)
        .bind(data.available_copies)
        .fetch_one(executor)
        .await
        .map_err(|e| author_reference_error(e, data.author_id))
    }

    /// Update the supplied fields of a book
    pub async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Book> {
        if data.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut sets: Vec<&str> = Vec::new();

        macro_rules! add_field {
            ($field:expr, $name:literal) => {
                if $field.is_some() {
                    sets.push(concat!($name, " = ?"));
                }
            };
        }

        add_field!(data.title, "title");
        add_field!(data.description, "description");
        add_field!(data.author_id, "author_id");
        add_field!(data.available_copies, "available_copies");

        let query = format!("UPDATE books SET {} WHERE id = ? RETURNING *", sets.join(", "));

        let mut builder = sqlx::query_as::<_, Book>(&query);

        // Nullable columns bind their inner Option, so `Some(None)` writes NULL
        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.title);
        bind_field!(data.description);
        bind_field!(data.author_id);
        bind_field!(data.available_copies);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| author_reference_error(e, data.author_id.flatten()))?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book together with every borrow record referencing it.
    ///
    /// Returns the book as it was before deletion.
    pub async fn delete(&self, id: i64) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let removed = BorrowsRepository::delete_by_book(&mut *tx, id).await?;

        let book = sqlx::query_as::<_, Book>("DELETE FROM books WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        tx.commit().await?;

        tracing::info!("Deleted book {} ({} borrows removed)", id, removed);
        Ok(book)
    }

    /// Clear the author reference on every book of an author
    pub async fn detach_author<'e, E: SqliteExecutor<'e>>(executor: E, author_id: i64) -> AppResult<u64> {
        let result = sqlx::query("UPDATE books SET author_id = NULL WHERE author_id = ?")
            .bind(author_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Take one copy off the shelf.
    ///
    /// Returns `None` when the book does not exist or has no copy left; the
    /// guard and the decrement are a single statement.
    pub async fn take_copy<'e, E: SqliteExecutor<'e>>(executor: E, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET available_copies = available_copies - 1
            WHERE id = ? AND available_copies > 0
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(book)
    }

    /// Put one copy back on the shelf. Returns `None` when the book does not exist.
    pub async fn restore_copy<'e, E: SqliteExecutor<'e>>(executor: E, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET available_copies = available_copies + 1
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(book)
    }
}

/// Map a foreign key violation on `books.author_id` to `NotFound`
fn author_reference_error(error: sqlx::Error, author_id: Option<i64>) -> AppError {
    match (error, author_id) {
        (sqlx::Error::Database(db), Some(author_id)) if db.is_foreign_key_violation() => {
            AppError::NotFound(format!("Author with id {} not found", author_id))
        }
        (error, _) => AppError::Database(error),
    }
}
