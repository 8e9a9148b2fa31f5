//! In-process book store.
//!
//! Same contract as [`PgStorage`](crate::PgStorage): exact-title uniqueness
//! checked and applied under a single write lock, case-insensitive removal,
//! title ordering. Nothing survives the process.

use async_trait::async_trait;
use bookshelf_core::{Book, NewBook};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::BookStore;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i32,
    books: Vec<Book>,
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<MemoryState>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryStorage {
    async fn initialize(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn add(&self, book: &NewBook) -> Result<Book, StorageError> {
        let mut state = self.state.write().await;
        if state.books.iter().any(|b| b.title == book.title()) {
            return Err(StorageError::Duplicate { title: book.title().to_owned() });
        }
        state.last_id += 1;
        let created = book.clone().into_book(state.last_id);
        state.books.push(created.clone());
        Ok(created)
    }

    async fn remove(&self, title: &str) -> Result<u64, StorageError> {
        let needle = title.to_lowercase();
        let mut state = self.state.write().await;
        let before = state.books.len();
        state.books.retain(|b| b.title.to_lowercase() != needle);
        Ok(u64::try_from(before - state.books.len()).unwrap_or(u64::MAX))
    }

    async fn list(&self) -> Result<Vec<Book>, StorageError> {
        let mut books = self.state.read().await.books.clone();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn get(&self, id: i32) -> Result<Option<Book>, StorageError> {
        Ok(self.state.read().await.books.iter().find(|b| b.id == id).cloned())
    }
}
