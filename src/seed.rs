//! Sample catalog inserted into an empty store

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::CreateAuthor,
        book::CreateBook,
        borrow::{CreateBorrow, DATE_FORMAT},
    },
    repository::{
        authors::AuthorsRepository, books::BooksRepository, borrows::BorrowsRepository, Repository,
    },
};

/// (first name, last name, birth date, title, description, copies, reader, borrow date)
const SAMPLE_CATALOG: &[(&str, &str, &str, &str, &str, i64, &str, &str)] = &[
    ("Leo", "Tolstoy", "1828-09-09", "War and Peace", "A historical novel by Leo Tolstoy.", 3, "Alice", "2023-01-01"),
    ("Fyodor", "Dostoevsky", "1821-11-11", "Crime and Punishment", "A novel by Fyodor Dostoevsky.", 2, "Bob", "2023-01-05"),
    ("Anton", "Chekhov", "1860-01-29", "The Cherry Orchard", "A play by Anton Chekhov.", 5, "Charlie", "2023-01-10"),
    ("Virginia", "Woolf", "1882-01-25", "Mrs. Dalloway", "A novel by Virginia Woolf.", 4, "Diana", "2023-01-15"),
    (
        "Gabriel",
        "Garcia Marquez",
        "1927-03-06",
        "One Hundred Years of Solitude",
        "A novel by Gabriel Garcia Marquez.",
        1,
        "Eve",
        "2023-01-20",
    ),
];

/// Insert the sample authors, books and borrows unless authors already exist.
///
/// Everything is written in one transaction, so a failed seed leaves the
/// store empty and the next start tries again. Each borrow takes a copy of
/// its book the same way the borrow workflow does. Returns whether anything
/// was inserted.
pub async fn seed_if_empty(repository: &Repository) -> AppResult<bool> {
    if repository.authors.count().await? > 0 {
        tracing::debug!("Catalog already populated, skipping seed");
        return Ok(false);
    }

    let mut tx = repository.pool.begin().await?;

    for &(first_name, last_name, birth_date, title, description, copies, reader, borrow_date) in
        SAMPLE_CATALOG
    {
        let author = CreateAuthor {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date: sample_date(birth_date)?,
        };
        author.validate()?;
        let author = AuthorsRepository::insert(&mut *tx, &author).await?;

        let book = CreateBook {
            title: title.to_string(),
            description: Some(description.to_string()),
            author_id: Some(author.id),
            available_copies: copies,
        };
        book.validate()?;
        let book = BooksRepository::insert(&mut *tx, &book).await?;

        BooksRepository::take_copy(&mut *tx, book.id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Sample book {} has no copy to lend", book.id)))?;

        let borrow = CreateBorrow {
            book_id: book.id,
            reader_name: reader.to_string(),
            borrow_date: sample_date(borrow_date)?,
        };
        borrow.validate()?;
        BorrowsRepository::insert(&mut *tx, &borrow).await?;
    }

    tx.commit().await?;

    tracing::info!("Seeded sample catalog with {} authors", SAMPLE_CATALOG.len());
    Ok(true)
}

fn sample_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| AppError::Internal(format!("Bad sample date {}: {}", value, e)))
}
