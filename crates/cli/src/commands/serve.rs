use anyhow::{Context, Result};
use bookshelf_core::AuthConfig;
use bookshelf_http::{AppState, create_router};
use bookshelf_service::{AuthService, BookService};
use std::sync::Arc;

pub(crate) async fn run(book_service: BookService, port: u16, host: String) -> Result<()> {
    let auth_config = AuthConfig::from_env()
        .context("BOOKSHELF_JWT_SECRET environment variable must be set to serve the API")?;
    tracing::info!(username = %auth_config.username, "login account configured");

    let state = Arc::new(AppState {
        book_service: Arc::new(book_service),
        auth_service: Arc::new(AuthService::new(&auth_config)),
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("HTTP server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
