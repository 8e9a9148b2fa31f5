//! PostgreSQL storage backend using sqlx.

use async_trait::async_trait;
use bookshelf_core::{Book, DatabaseConfig, NewBook};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::StorageError;
use crate::pg_schema::ensure_pg_schema;
use crate::traits::BookStore;

const BOOK_COLUMNS: &str = "id, title, author, release_date";

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Open a connection pool. Does not touch the schema; call
    /// [`BookStore::initialize`] afterwards.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;
        tracing::debug!(max_connections = config.max_connections, "PgStorage connected");
        Ok(Self { pool })
    }
}

#[async_trait]
impl BookStore for PgStorage {
    async fn initialize(&self) -> Result<(), StorageError> {
        ensure_pg_schema(&self.pool).await.map_err(StorageError::Initialize)?;
        tracing::info!("books schema ready");
        Ok(())
    }

    async fn add(&self, book: &NewBook) -> Result<Book, StorageError> {
        let sql = format!(
            "INSERT INTO books (title, author, release_date) VALUES ($1, $2, $3) RETURNING {BOOK_COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(book.title())
            .bind(book.author())
            .bind(book.release_date())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match StorageError::from(e) {
                StorageError::Duplicate { .. } => {
                    StorageError::Duplicate { title: book.title().to_owned() }
                },
                other => other,
            })
    }

    async fn remove(&self, title: &str) -> Result<u64, StorageError> {
        // Exact comparison on lowered values; ILIKE would treat % and _ as wildcards.
        let result = sqlx::query("DELETE FROM books WHERE LOWER(title) = LOWER($1)")
            .bind(title)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list(&self) -> Result<Vec<Book>, StorageError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY title ASC");
        Ok(sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Book>, StorageError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1");
        Ok(sqlx::query_as::<_, Book>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }
}
