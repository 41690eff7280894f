//! Borrow workflow
//!
//! Every active borrow holds exactly one unit of its book's
//! `available_copies`. Each operation that creates, returns or removes a
//! borrow runs the counter change and the borrow change in one transaction.
//! The first statement of each transaction is a guarded write, so SQLite's
//! write lock is held before any state is read back.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{parse_return_date, Borrow, CreateBorrow, UpdateBorrow},
        ListParams,
    },
    repository::{books::BooksRepository, borrows::BorrowsRepository, Repository},
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_borrow(&self, id: i64) -> AppResult<Borrow> {
        self.repository.borrows.get_by_id(id).await
    }

    pub async fn list_borrows(&self, params: &ListParams) -> AppResult<Vec<Borrow>> {
        params.validate()?;
        self.repository.borrows.list(params).await
    }

    /// Lend a copy of a book.
    ///
    /// Fails with `NotFound` for an unknown book and `Unavailable` when no
    /// copy is left; in both cases nothing is written.
    pub async fn create_borrow(&self, data: CreateBorrow) -> AppResult<Borrow> {
        data.validate()?;

        let mut tx = self.repository.pool.begin().await?;

        let taken = BooksRepository::take_copy(&mut *tx, data.book_id).await?;
        if taken.is_none() {
            let book = BooksRepository::find(&mut *tx, data.book_id).await?;
            return Err(match book {
                None => AppError::NotFound(format!("Book with id {} not found", data.book_id)),
                Some(book) => {
                    tracing::warn!("Borrow refused: book {} has no available copies", book.id);
                    AppError::Unavailable("Book is not available for borrowing".to_string())
                }
            });
        }

        let borrow = BorrowsRepository::insert(&mut *tx, &data).await?;

        tx.commit().await?;

        tracing::info!(
            "Book {} borrowed by {} (borrow {})",
            borrow.book_id,
            borrow.reader_name,
            borrow.id
        );
        Ok(borrow)
    }

    /// Record the return of a borrowed copy.
    ///
    /// `return_date` is the external `YYYY-MM-DD` representation; it is
    /// parsed before anything is written.
    pub async fn return_borrow(&self, id: i64, return_date: &str) -> AppResult<Borrow> {
        let borrow = self.repository.borrows.get_by_id(id).await?;
        let return_date = parse_return_date(return_date)?;

        if !borrow.is_active() {
            return Err(already_returned(id));
        }

        let mut tx = self.repository.pool.begin().await?;

        let marked = BorrowsRepository::mark_returned(&mut *tx, id, return_date).await?;
        let Some(returned) = marked else {
            // Lost a race with another return or a delete
            let current = BorrowsRepository::find(&mut *tx, id).await?;
            return Err(match current {
                Some(_) => already_returned(id),
                None => AppError::NotFound(format!("Borrow record with id {} not found", id)),
            });
        };

        BooksRepository::restore_copy(&mut *tx, returned.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", returned.book_id)))?;

        tx.commit().await?;

        tracing::info!("Borrow {} returned on {}", id, return_date);
        Ok(returned)
    }

    /// Edit reader name or borrow date; the book and return date are fixed here
    pub async fn update_borrow(&self, id: i64, data: UpdateBorrow) -> AppResult<Borrow> {
        data.validate()?;
        self.repository.borrows.update(id, &data).await
    }

    /// Delete a borrow record, putting the copy back if it was still out
    pub async fn delete_borrow(&self, id: i64) -> AppResult<Borrow> {
        let mut tx = self.repository.pool.begin().await?;

        let borrow = BorrowsRepository::remove(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))?;

        if borrow.is_active() {
            let restored = BooksRepository::restore_copy(&mut *tx, borrow.book_id).await?;
            if restored.is_none() {
                tracing::warn!("Active borrow {} referenced missing book {}", id, borrow.book_id);
            }
        }

        tx.commit().await?;

        tracing::info!("Deleted borrow {}", id);
        Ok(borrow)
    }
}

fn already_returned(id: i64) -> AppError {
    AppError::AlreadyReturned(format!("Borrow record with id {} was already returned", id))
}
