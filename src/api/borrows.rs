//! Borrow endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    api::{JsonBody, PathParam, QueryParams},
    error::{AppError, AppResult},
    models::{
        borrow::{Borrow, CreateBorrow, UpdateBorrow},
        ListParams,
    },
    AppState,
};

#[derive(Deserialize)]
pub struct ReturnParams {
    pub return_date: Option<String>,
}

/// List borrow records with pagination
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    params(
        ("skip" = Option<i64>, Query, description = "Number of records to skip (default: 0)"),
        ("limit" = Option<i64>, Query, description = "Maximum number of records (default: 10)")
    ),
    responses(
        (status = 200, description = "List of borrow records", body = Vec<Borrow>),
        (status = 422, description = "Invalid pagination")
    )
)]
pub async fn list_borrows(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<Vec<Borrow>>> {
    let borrows = state.services.borrows.list_borrows(&params).await?;
    Ok(Json(borrows))
}

/// Get borrow record by ID
#[utoipa::path(
    get,
    path = "/borrows/{id}",
    tag = "borrows",
    params(("id" = i64, Path, description = "Borrow ID")),
    responses(
        (status = 200, description = "Borrow record", body = Borrow),
        (status = 404, description = "Borrow record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_borrow(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<Borrow>> {
    let borrow = state.services.borrows.get_borrow(id).await?;
    Ok(Json(borrow))
}

/// Borrow a copy of a book
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Book borrowed", body = Borrow),
        (status = 400, description = "No copy available", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_borrow(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<CreateBorrow>,
) -> AppResult<(StatusCode, Json<Borrow>)> {
    let borrow = state.services.borrows.create_borrow(data).await?;
    Ok((StatusCode::CREATED, Json(borrow)))
}

/// Return a borrowed book
#[utoipa::path(
    patch,
    path = "/borrows/{id}/return",
    tag = "borrows",
    params(
        ("id" = i64, Path, description = "Borrow ID"),
        ("return_date" = String, Query, description = "Return date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Book returned", body = Borrow),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse),
        (status = 404, description = "Borrow record or book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Already returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_borrow(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    QueryParams(params): QueryParams<ReturnParams>,
) -> AppResult<Json<Borrow>> {
    let return_date = params
        .return_date
        .ok_or_else(|| AppError::BadRequest("return_date query parameter is required".to_string()))?;

    let borrow = state.services.borrows.return_borrow(id, &return_date).await?;
    Ok(Json(borrow))
}

/// Update reader name or borrow date of a borrow record
#[utoipa::path(
    put,
    path = "/borrows/{id}",
    tag = "borrows",
    params(("id" = i64, Path, description = "Borrow ID")),
    request_body = UpdateBorrow,
    responses(
        (status = 200, description = "Borrow record updated", body = Borrow),
        (status = 404, description = "Borrow record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_borrow(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(data): JsonBody<UpdateBorrow>,
) -> AppResult<Json<Borrow>> {
    let borrow = state.services.borrows.update_borrow(id, data).await?;
    Ok(Json(borrow))
}

/// Delete a borrow record; an outstanding copy goes back to the book
#[utoipa::path(
    delete,
    path = "/borrows/{id}",
    tag = "borrows",
    params(("id" = i64, Path, description = "Borrow ID")),
    responses(
        (status = 200, description = "Deleted borrow record", body = Borrow),
        (status = 404, description = "Borrow record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_borrow(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<Borrow>> {
    let borrow = state.services.borrows.delete_borrow(id).await?;
    Ok(Json(borrow))
}
