//! Storage layer for bookshelf
//!
//! PostgreSQL-backed book table with a storage-enforced unique title, plus an
//! in-process store with the same semantics.

mod error;
mod memory;
mod pg_schema;
mod pg_storage;
pub mod traits;

pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_storage::PgStorage;
pub use traits::BookStore;
