//! Typed error enum for the storage layer.
//!
//! Callers match on the failure mode (duplicate title, transient DB error)
//! instead of inspecting vendor error codes themselves.

use thiserror::Error;

use crate::pg_schema::TITLE_UNIQUE_CONSTRAINT;

/// SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StorageError {
    /// Unique constraint violation on the book title.
    #[error("duplicate title: {title}")]
    Duplicate { title: String },

    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// A stored row could not be decoded into a `Book`.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema creation failure.
    #[error("schema initialization error: {0}")]
    Initialize(#[source] sqlx::Error),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Database(err) | Self::Initialize(err) => is_unavailable(err),
            Self::Duplicate { .. } | Self::DataCorruption { .. } => false,
        }
    }

    /// Whether this error is a unique-constraint violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

fn is_unavailable(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_))
}

/// Only a unique violation on the title constraint is a duplicate book;
/// any other 23505 (e.g. a primary key collision) is a plain database error.
fn is_title_conflict(code: Option<&str>, constraint: Option<&str>) -> bool {
    code == Some(PG_UNIQUE_VIOLATION) && constraint == Some(TITLE_UNIQUE_CONSTRAINT)
}

/// Custom `From<sqlx::Error>`, not blanket `#[from]`.
///
/// - 23505 on the title constraint → `Duplicate` (with the DB message; `add` replaces it with the title)
/// - Decode failures → `DataCorruption`
/// - Everything else → `Database`
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err)
                if is_title_conflict(db_err.code().as_deref(), db_err.constraint()) =>
            {
                Self::Duplicate { title: db_err.message().to_owned() }
            },
            sqlx::Error::ColumnDecode { index, source } => {
                Self::DataCorruption { context: format!("decoding books column {index}"), source }
            },
            sqlx::Error::Decode(source) => {
                Self::DataCorruption { context: "decoding books row".to_owned(), source }
            },
            other => Self::Database(other),
        }
    }
}
