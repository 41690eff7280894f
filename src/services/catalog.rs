//! Catalog service: authors and books

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::{Book, CreateBook, UpdateBook},
        borrow::Borrow,
        ListParams,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // Authors

    pub async fn create_author(&self, data: CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors.create(&data).await?;
        tracing::info!("Created author {} ({} {})", author.id, author.first_name, author.last_name);
        Ok(author)
    }

    pub async fn get_author(&self, id: i64) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn list_authors(&self, params: &ListParams) -> AppResult<Vec<Author>> {
        params.validate()?;
        self.repository.authors.list(params).await
    }

    pub async fn update_author(&self, id: i64, data: UpdateAuthor) -> AppResult<Author> {
        data.validate()?;
        self.repository.authors.update(id, &data).await
    }

    /// Delete an author; its books stay in the catalog without an author
    pub async fn delete_author(&self, id: i64) -> AppResult<Author> {
        self.repository.authors.delete(id).await
    }

    /// Books of an author
    pub async fn list_author_books(&self, author_id: i64, params: &ListParams) -> AppResult<Vec<Book>> {
        params.validate()?;
        // Verify author exists
        self.repository.authors.get_by_id(author_id).await?;
        self.repository.books.list_by_author(author_id, params).await
    }

    // Books

    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()?;
        if let Some(author_id) = data.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        let book = self.repository.books.create(&data).await?;
        tracing::info!("Created book {} ({} copies)", book.id, book.available_copies);
        Ok(book)
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn list_books(&self, params: &ListParams) -> AppResult<Vec<Book>> {
        params.validate()?;
        self.repository.books.list(params).await
    }

    pub async fn update_book(&self, id: i64, data: UpdateBook) -> AppResult<Book> {
        data.validate()?;
        if let Some(Some(author_id)) = data.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        self.repository.books.update(id, &data).await
    }

    /// Delete a book and all of its borrow records
    pub async fn delete_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.delete(id).await
    }

    /// Borrow history of a book
    pub async fn list_book_borrows(&self, book_id: i64, params: &ListParams) -> AppResult<Vec<Borrow>> {
        params.validate()?;
        // Verify book exists
        self.repository.books.get_by_id(book_id).await?;
        self.repository.borrows.list_by_book(book_id, params).await
    }
}
