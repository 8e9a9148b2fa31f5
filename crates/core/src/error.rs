use thiserror::Error;

/// Malformed or missing input, detected before any storage call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("author must not be empty")]
    EmptyAuthor,

    #[error("release date must be in format YYYY-MM-DD, got '{0}'")]
    InvalidDate(String),
}
