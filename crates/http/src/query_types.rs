//! Request body types (Deserialize)

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Missing title/author deserialize as empty and fail validation with 400.
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// `YYYY-MM-DD`; absent or `null` for unknown.
    pub release_date: Option<String>,
}
