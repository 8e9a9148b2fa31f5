//! PostgreSQL schema for the books table.

use sqlx::PgPool;

/// Name of the unique constraint on `books.title`.
pub(crate) const TITLE_UNIQUE_CONSTRAINT: &str = "books_title_key";

/// Create the `books` table and its lookup index if they are missing.
pub async fn ensure_pg_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            release_date DATE,
            CONSTRAINT books_title_key UNIQUE (title)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Serves the case-insensitive delete lookup.
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_title_lower ON books (LOWER(title))")
        .execute(pool)
        .await?;

    Ok(())
}
