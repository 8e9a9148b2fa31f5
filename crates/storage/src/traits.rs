//! Storage backend trait abstraction.

use async_trait::async_trait;
use bookshelf_core::{Book, NewBook};

use crate::error::StorageError;

/// Durable storage of book records.
///
/// Title uniqueness is enforced atomically by the implementation, never by a
/// separate existence check before the insert.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Ensure the backing schema exists. Safe to call on every startup.
    async fn initialize(&self) -> Result<(), StorageError>;

    /// Insert a book and return it with its assigned id.
    ///
    /// Returns [`StorageError::Duplicate`] if the exact title is taken.
    async fn add(&self, book: &NewBook) -> Result<Book, StorageError>;

    /// Delete every book whose title equals `title` ignoring case.
    /// Returns the number of rows removed; zero is not an error.
    async fn remove(&self, title: &str) -> Result<u64, StorageError>;

    /// All books ordered by title ascending.
    async fn list(&self) -> Result<Vec<Book>, StorageError>;

    /// Get book by ID.
    async fn get(&self, id: i32) -> Result<Option<Book>, StorageError>;
}
