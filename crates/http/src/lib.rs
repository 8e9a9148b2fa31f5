//! HTTP API server for bookshelf.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod auth;
mod handlers;
mod query_types;
mod response_types;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use bookshelf_service::{AuthService, BookService};

pub use auth::{BEARER_PREFIX, bearer_token};
pub use response_types::DeleteBookResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// The book catalog contract (same one the CLI uses)
    pub book_service: Arc<BookService>,
    /// Login and token verification
    pub auth_service: Arc<AuthService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let books = Router::new()
        .route("/api/books", get(handlers::books::list_books).post(handlers::books::create_book))
        .route(
            "/api/books/{key}",
            get(handlers::books::get_book).delete(handlers::books::delete_book),
        )
        .route_layer(middleware::from_fn_with_state(Arc::clone(&state), auth::require_bearer));

    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(handlers::auth::login))
        .merge(books)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
