//! Book operations with human-readable output.
//!
//! Shared by the interactive shell and the one-shot subcommands so both print
//! the same messages. Each function returns `Ok(false)` for a user-correctable
//! failure (duplicate title, invalid input) that has already been reported, and
//! `Err` for storage failures.

use std::io::Write;

use anyhow::Result;
use bookshelf_core::format_release_date;
use bookshelf_service::{BookService, ServiceError};

pub(crate) async fn add_book<W: Write>(
    service: &BookService,
    out: &mut W,
    title: &str,
    author: &str,
    release_date: Option<&str>,
) -> Result<bool> {
    match service.add(title, author, release_date).await {
        Ok(book) => {
            writeln!(
                out,
                "Added book: \"{}\" by {} ({})",
                book.title,
                book.author,
                format_release_date(book.release_date)
            )?;
            Ok(true)
        },
        Err(ServiceError::DuplicateTitle(title)) => {
            writeln!(out, "A book with the title \"{title}\" already exists.")?;
            Ok(false)
        },
        Err(ServiceError::Validation(e)) => {
            writeln!(out, "Invalid input: {e}.")?;
            Ok(false)
        },
        Err(e) => Err(e.into()),
    }
}

pub(crate) async fn remove_book<W: Write>(
    service: &BookService,
    out: &mut W,
    title: &str,
) -> Result<bool> {
    if service.remove(title).await? > 0 {
        writeln!(out, "Removed book titled \"{title}\".")?;
        Ok(true)
    } else {
        writeln!(out, "No book found with title \"{title}\".")?;
        Ok(false)
    }
}

pub(crate) async fn list_books<W: Write>(service: &BookService, out: &mut W) -> Result<bool> {
    let books = service.list().await?;
    writeln!(out, "Books in database:")?;
    if books.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for book in &books {
        writeln!(out, "  {book}")?;
    }
    Ok(true)
}
