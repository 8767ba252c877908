//! Book CRUD handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use super::{json_body, parse_id};
use crate::error::AppError;
use crate::models::{BookRequest, BookResponse, NewBook};
use crate::response::{ok, success_operation};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let books = state
        .books
        .list()
        .await
        .map_err(AppError::storage_as_bad_request)?;
    let body: Vec<BookResponse> = books.into_iter().map(BookResponse::from).collect();
    Ok(ok(body))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let book = state
        .books
        .get(id)
        .await
        .map_err(AppError::storage_as_bad_request)?
        .ok_or_else(|| AppError::NotFound(format!("book {}", id)))?;
    Ok(ok(BookResponse::from(book)))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let book = NewBook::from(json_body(payload)?);
    let created = state.books.create(&book).await?;
    tracing::info!(book_id = created.id, "book created");
    Ok(success_operation())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let book = NewBook::from(json_body(payload)?);
    state
        .books
        .update(&book, id)
        .await
        .map_err(AppError::storage_as_bad_request)?
        .ok_or_else(|| AppError::NotFound(format!("book {}", id)))?;
    tracing::info!(book_id = id, "book updated");
    Ok(success_operation())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state
        .books
        .delete(id)
        .await
        .map_err(AppError::storage_as_bad_request)?
        .ok_or_else(|| AppError::NotFound(format!("book {}", id)))?;
    tracing::info!(book_id = id, "book deleted");
    Ok(success_operation())
}
