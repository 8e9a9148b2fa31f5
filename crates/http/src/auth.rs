//! Bearer token gate for protected routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::AppState;
use crate::api_error::ApiError;

/// The scheme expected in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer";

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) || token.is_empty() {
        return None;
    }
    Some(token)
}

/// Reject the request with 401 unless it carries a valid token.
///
/// The verified claims are inserted into the request extensions.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_owned()))?;
    let claims = state.auth_service.verify(token)?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
