//! Authors repository for database operations

use sqlx::{SqliteExecutor, SqlitePool};

use super::books::BooksRepository;
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        ListParams,
    },
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: SqlitePool,
}

impl AuthorsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up an author on any executor
    pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: i64) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(author)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Author> {
        Self::find(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// List authors ordered by ID
    pub async fn list(&self, params: &ListParams) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(params.limit())
        .bind(params.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Create an author
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        Self::insert(&self.pool, data).await
    }

    /// Insert an author on any executor
    pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, data: &CreateAuthor) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name, birth_date)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.birth_date)
        .fetch_one(executor)
        .await?;
        Ok(author)
    }

    /// Update the supplied fields of an author
    pub async fn update(&self, id: i64, data: &UpdateAuthor) -> AppResult<Author> {
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

        add_field!(data.first_name, "first_name");
        add_field!(data.last_name, "last_name");
        add_field!(data.birth_date, "birth_date");

        let query = format!("UPDATE authors SET {} WHERE id = ? RETURNING *", sets.join(", "));

        let mut builder = sqlx::query_as::<_, Author>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.first_name);
        bind_field!(data.last_name);
        bind_field!(data.birth_date);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Delete an author, detaching its books first.
    ///
    /// Returns the author as it was before deletion.
    pub async fn delete(&self, id: i64) -> AppResult<Author> {
        let mut tx = self.pool.begin().await?;

        let detached = BooksRepository::detach_author(&mut *tx, id).await?;

        let author = sqlx::query_as::<_, Author>("DELETE FROM authors WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;

        tx.commit().await?;

        tracing::info!("Deleted author {} ({} books detached)", id, detached);
        Ok(author)
    }

    /// Count all authors
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
