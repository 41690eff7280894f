//! Book endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    api::{JsonBody, PathParam, QueryParams},
    error::AppResult,
    models::{
        book::{Book, CreateBook, UpdateBook},
        borrow::Borrow,
        ListParams,
    },
    AppState,
};

/// List books with pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("skip" = Option<i64>, Query, description = "Number of books to skip (default: 0)"),
        ("limit" = Option<i64>, Query, description = "Maximum number of books (default: 10)")
    ),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 422, description = "Invalid pagination")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books(&params).await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.catalog.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book (only supplied fields change, `null` clears nullable ones)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book or author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(data): JsonBody<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update_book(id, data).await?;
    Ok(Json(book))
}

/// Delete a book and its borrow records
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Deleted book", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.delete_book(id).await?;
    Ok(Json(book))
}

/// List the borrow records of a book
#[utoipa::path(
    get,
    path = "/books/{id}/borrows",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID"),
        ("skip" = Option<i64>, Query, description = "Number of records to skip (default: 0)"),
        ("limit" = Option<i64>, Query, description = "Maximum number of records (default: 10)")
    ),
    responses(
        (status = 200, description = "Borrow records of the book", body = Vec<Borrow>),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_book_borrows(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<Vec<Borrow>>> {
    let borrows = state.services.catalog.list_book_borrows(id, &params).await?;
    Ok(Json(borrows))
}
