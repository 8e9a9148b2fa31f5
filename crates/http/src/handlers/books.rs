use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use std::sync::Arc;

use bookshelf_core::Book;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::CreateBookRequest;
use crate::response_types::DeleteBookResponse;

pub async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.book_service.list().await?))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id: i32 =
        id.parse().map_err(|_| ApiError::BadRequest(format!("invalid book id '{id}'")))?;
    state
        .book_service
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No book found with id {id}.")))
}

pub async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let book = state
        .book_service
        .add(&req.title, &req.author, req.release_date.as_deref())
        .await?;
    let location = format!("/api/books/{}", book.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(book)))
}

pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<DeleteBookResponse>, ApiError> {
    let removed = state.book_service.remove(&title).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!("No book found with title '{title}'.")));
    }
    Ok(Json(DeleteBookResponse { removed, title }))
}
