use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use bookshelf_service::IssuedToken;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::LoginRequest;

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<IssuedToken>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(state.auth_service.login(&req.username, &req.password)?))
}
