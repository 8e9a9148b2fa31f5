use std::sync::Arc;

use bookshelf_core::{Book, NewBook};
use bookshelf_storage::BookStore;

use crate::ServiceError;

/// The book catalog contract shared by the CLI and the HTTP API.
///
/// Validates input before touching storage and maps storage failures into
/// [`ServiceError`]. Holds no state of its own beyond the store handle.
#[derive(Clone)]
pub struct BookService {
    storage: Arc<dyn BookStore>,
}

impl BookService {
    #[must_use]
    pub fn new(storage: Arc<dyn BookStore>) -> Self {
        Self { storage }
    }

    pub async fn initialize(&self) -> Result<(), ServiceError> {
        Ok(self.storage.initialize().await?)
    }

    /// Validate raw input and add the book.
    pub async fn add(
        &self,
        title: &str,
        author: &str,
        release_date: Option<&str>,
    ) -> Result<Book, ServiceError> {
        let book = NewBook::parse(title, author, release_date)?;
        self.add_book(book).await
    }

    pub async fn add_book(&self, book: NewBook) -> Result<Book, ServiceError> {
        match self.storage.add(&book).await {
            Ok(created) => {
                tracing::info!(id = created.id, title = %created.title, "book added");
                Ok(created)
            },
            Err(e) => {
                let err = ServiceError::from(e);
                if err.is_duplicate() {
                    tracing::warn!(title = %book.title(), "rejected duplicate title");
                }
                Err(err)
            },
        }
    }

    /// Remove books by case-insensitive title. Returns the number removed.
    pub async fn remove(&self, title: &str) -> Result<u64, ServiceError> {
        let removed = self.storage.remove(title).await?;
        tracing::info!(title, removed, "remove by title");
        Ok(removed)
    }

    pub async fn list(&self) -> Result<Vec<Book>, ServiceError> {
        Ok(self.storage.list().await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Book>, ServiceError> {
        Ok(self.storage.get(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use bookshelf_core::ValidationError;
    use bookshelf_storage::MemoryStorage;
    use chrono::NaiveDate;

    use super::*;

    fn service() -> BookService {
        BookService::new(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_initialize_twice() {
        let service = service();
        service.initialize().await.unwrap();
        service.initialize().await.unwrap();
    }

    #[tokio::test]
    async fn test_round_trip() {
        let service = service();
        let created = service.add("Dune", "Frank Herbert", Some("1965-08-01")).await.unwrap();

        let books = service.list().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0], created);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].author, "Frank Herbert");
        assert_eq!(books[0].release_date, NaiveDate::from_ymd_opt(1965, 8, 1));
    }

    #[tokio::test]
    async fn test_duplicate_title() {
        let service = service();
        service.add("Dune", "Frank Herbert", None).await.unwrap();
        let err = service.add("Dune", "Someone Else", None).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateTitle(ref t) if t == "Dune"));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_duplicate_adds() {
        let service = service();
        let (a, b) = tokio::join!(
            service.add("Dune", "Frank Herbert", None),
            service.add("Dune", "Frank Herbert", None),
        );
        assert!(a.is_ok() ^ b.is_ok(), "exactly one add must succeed");
        let loser = a.err().or(b.err()).unwrap();
        assert!(loser.is_duplicate());
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_case_insensitive() {
        let service = service();
        service.add("Dune", "Frank Herbert", None).await.unwrap();
        assert_eq!(service.remove("dune").await.unwrap(), 1);
        assert!(service.list().await.unwrap().is_empty());
        assert_eq!(service.remove("nonexistent").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_ordering() {
        let service = service();
        for title in ["Zebra", "Apple", "Mango"] {
            service.add(title, "Author", None).await.unwrap();
        }
        let titles: Vec<_> = service.list().await.unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["Apple", "Mango", "Zebra"]);
    }

    #[tokio::test]
    async fn test_validation_performs_no_mutation() {
        let service = service();
        let err = service.add("", "Author", Some("2020-01-01")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::EmptyTitle)));

        let err = service.add("Title", "Author", Some("2020-13-01")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::InvalidDate(_))));

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let service = service();
        let created = service.add("Emma", "Jane Austen", None).await.unwrap();
        assert_eq!(service.get(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(service.get(created.id + 100).await.unwrap(), None);
    }
}
