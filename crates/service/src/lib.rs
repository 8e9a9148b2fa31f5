//! Service layer for bookshelf
//!
//! The single book catalog contract used by both the CLI and the HTTP API,
//! plus login token issuance.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod auth_service;
mod book_service;
mod error;

pub use auth_service::{AuthService, Claims, IssuedToken};
pub use book_service::BookService;
pub use error::{AuthError, ServiceError};
