//! Book record types and input validation.

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Textual date format used at every boundary (CLI arguments, JSON, output).
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
pub struct Book {
    /// Surrogate key assigned by the store.
    pub id: i32,
    /// Unique title, stored exactly as given.
    pub title: String,
    pub author: String,
    /// Serialized as `YYYY-MM-DD`, `null` when unknown.
    pub release_date: Option<NaiveDate>,
}

impl Book {
    #[must_use]
    pub fn new(id: i32, title: String, author: String, release_date: Option<NaiveDate>) -> Self {
        Self { id, title, author, release_date }
    }

    /// Release date as `YYYY-MM-DD`, or `N/A`.
    #[must_use]
    pub fn release_date_display(&self) -> String {
        format_release_date(self.release_date)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "\"{}\" by {}, released: {}", self.title, self.author, self.release_date_display())
    }
}

/// Validated input for creating a book.
///
/// Only constructible through [`NewBook::new`] or [`NewBook::parse`], so a
/// value of this type always has a non-blank title and author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    title: String,
    author: String,
    release_date: Option<NaiveDate>,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        release_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let author = author.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        Ok(Self { title, author, release_date })
    }

    /// Validate raw text input, parsing the optional date as `YYYY-MM-DD`.
    ///
    /// A blank date string is treated as absent.
    pub fn parse(
        title: impl Into<String>,
        author: impl Into<String>,
        release_date: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let release_date = match release_date.map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_release_date(raw)?),
            _ => None,
        };
        Self::new(title, author, release_date)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    /// Attach the id assigned by the store.
    #[must_use]
    pub fn into_book(self, id: i32) -> Book {
        Book::new(id, self.title, self.author, self.release_date)
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_release_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    // chrono accepts unpadded fields; the boundary format is fixed width.
    let well_formed = raw.len() == 10
        && raw.char_indices().all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    if !well_formed {
        return Err(ValidationError::InvalidDate(raw.to_owned()));
    }
    NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_owned()))
}

#[must_use]
pub fn format_release_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "N/A".to_owned(), |d| d.format(RELEASE_DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_input() {
        let book = NewBook::parse("Dune", "Frank Herbert", Some("1965-08-01")).unwrap();
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Frank Herbert");
        assert_eq!(book.release_date(), NaiveDate::from_ymd_opt(1965, 8, 1));
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = NewBook::parse("", "Author", Some("2020-01-01")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);
    }

    #[test]
    fn test_blank_author_rejected() {
        let err = NewBook::parse("Title", "   ", None).unwrap_err();
        assert_eq!(err, ValidationError::EmptyAuthor);
    }

    #[test]
    fn test_missing_date_is_allowed() {
        let book = NewBook::parse("Title", "Author", None).unwrap();
        assert_eq!(book.release_date(), None);
        let book = NewBook::parse("Title", "Author", Some("  ")).unwrap();
        assert_eq!(book.release_date(), None);
    }

    #[test]
    fn test_malformed_dates_rejected() {
        for raw in ["1965-8-1", "01-08-1965", "1965/08/01", "1965-02-30", "yesterday", "1965-08-01T00:00"] {
            assert!(
                matches!(parse_release_date(raw), Err(ValidationError::InvalidDate(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_title_case_is_preserved() {
        let book = NewBook::parse("The Three Musketeers", "Alexandre Dumas", None).unwrap();
        assert_eq!(book.into_book(7).title, "The Three Musketeers");
    }

    #[test]
    fn test_display_formats() {
        let book = Book::new(1, "Dune".into(), "Frank Herbert".into(), NaiveDate::from_ymd_opt(1965, 8, 1));
        assert_eq!(book.to_string(), "\"Dune\" by Frank Herbert, released: 1965-08-01");
        let undated = Book::new(2, "Emma".into(), "Jane Austen".into(), None);
        assert_eq!(undated.release_date_display(), "N/A");
    }

    #[test]
    fn test_json_date_format() {
        let book = Book::new(1, "Dune".into(), "Frank Herbert".into(), NaiveDate::from_ymd_opt(1965, 8, 1));
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["release_date"], "1965-08-01");
        assert_eq!(json["id"], 1);
    }
}
