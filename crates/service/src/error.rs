//! Typed error enums for the service layer.
//!
//! Front ends match on these to choose a status code or message; nothing is
//! retried here.

use bookshelf_core::ValidationError;
use bookshelf_storage::StorageError;
use thiserror::Error;

/// Failure of a book catalog operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller provided invalid input. No storage call was made.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// A book with this exact title already exists.
    #[error("a book with the title \"{0}\" already exists")]
    DuplicateTitle(String),

    /// Storage operation failed (connectivity, unexpected DB error).
    #[error("storage: {0}")]
    Storage(StorageError),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying by the caller).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_transient())
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateTitle(_))
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { title } => Self::DuplicateTitle(title),
            other => Self::Storage(other),
        }
    }
}

/// Failure of a login or token check.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("token encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
}
