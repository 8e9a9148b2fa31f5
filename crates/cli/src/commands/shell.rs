//! Interactive book shell.

use std::io::Write;
use std::sync::LazyLock;

use anyhow::Result;
use bookshelf_service::BookService;
use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::books::{add_book, list_books, remove_book};

const BANNER: &str = "Book Manager CLI. Type 'help' for commands.";
const PROMPT: &str = "> ";
const ADD_USAGE: &str = "Usage: add \"Title\" \"Author\" [YYYY-MM-DD]\n\
Note: If the title or author contains spaces, wrap them in quotes. Example:\n  \
add \"The Three Musketeers\" \"Alexandre Dumas\" 1844-03-14";
const REMOVE_USAGE: &str = "Usage: remove \"Title\"";
const HELP: &str = "Commands:
  add \"Title\" \"Author\" [YYYY-MM-DD]   Adds a book. Example: add \"Dune\" \"Frank Herbert\" 1965-08-01
  remove \"Title\"                       Removes the book with that title (case-insensitive).
  list                                 Lists all books.
  help                                 Shows this message.
  exit / quit                          Exit the program.";

/// A quoted group (quotes stripped) or a run of non-whitespace.
#[allow(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).unwrap());

/// Split a command line into arguments, honoring double quotes.
pub(crate) fn tokenize(line: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(line)
        .filter_map(|caps| match (caps.get(1), caps.get(2)) {
            (Some(quoted), _) => Some(quoted.as_str().to_owned()),
            // Unbalanced quotes are not part of the argument.
            (None, Some(bare)) => Some(bare.as_str().trim_matches('"').to_owned()),
            (None, None) => None,
        })
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Add { title: String, author: String, release_date: Option<String> },
    Remove { title: String },
    List,
    Help,
    Exit,
    /// Wrong argument count; carries the usage text to print.
    Usage(&'static str),
    Unknown(String),
}

impl ShellCommand {
    /// Parse tokenized input. Returns `None` for a blank line.
    pub(crate) fn parse(tokens: Vec<String>) -> Option<Self> {
        let mut tokens = tokens.into_iter();
        let name = tokens.next()?.to_lowercase();
        let args: Vec<String> = tokens.collect();
        let command = match name.as_str() {
            "add" => match <[String; 3]>::try_from(args) {
                Ok([title, author, date]) => Self::Add { title, author, release_date: Some(date) },
                Err(args) => match <[String; 2]>::try_from(args) {
                    Ok([title, author]) => Self::Add { title, author, release_date: None },
                    Err(_) => Self::Usage(ADD_USAGE),
                },
            },
            "remove" => match <[String; 1]>::try_from(args) {
                Ok([title]) => Self::Remove { title },
                Err(_) => Self::Usage(REMOVE_USAGE),
            },
            "list" => Self::List,
            "help" => Self::Help,
            "exit" | "quit" => Self::Exit,
            _ => Self::Unknown(name),
        };
        Some(command)
    }
}

/// Run the read-eval-print loop until `exit`/`quit` or end of input.
///
/// A failing command is reported and the loop continues.
pub(crate) async fn run_shell<R, W>(service: &BookService, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{BANNER}")?;
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let Some(command) = ShellCommand::parse(tokenize(&line)) else {
            continue;
        };
        if command == ShellCommand::Exit {
            break;
        }
        if let Err(e) = execute(service, command, out).await {
            tracing::debug!(error = ?e, "shell command failed");
            writeln!(out, "Error: {e}")?;
        }
    }
    Ok(())
}

async fn execute<W: Write>(service: &BookService, command: ShellCommand, out: &mut W) -> Result<()> {
    match command {
        ShellCommand::Add { title, author, release_date } => {
            add_book(service, out, &title, &author, release_date.as_deref()).await?;
        },
        ShellCommand::Remove { title } => {
            remove_book(service, out, &title).await?;
        },
        ShellCommand::List => {
            list_books(service, out).await?;
        },
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Usage(usage) => writeln!(out, "{usage}")?,
        ShellCommand::Unknown(name) => {
            writeln!(out, "Unknown command: {name}. Type 'help' to see available commands.")?;
        },
        ShellCommand::Exit => {},
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use bookshelf_core::{Book, NewBook};
    use bookshelf_storage::{BookStore, MemoryStorage, StorageError};

    use super::*;

    /// A store whose database is unreachable.
    struct UnreachableStorage;

    fn pool_timeout() -> StorageError {
        StorageError::Database(sqlx::Error::PoolTimedOut)
    }

    #[async_trait]
    impl BookStore for UnreachableStorage {
        async fn initialize(&self) -> Result<(), StorageError> {
            Err(pool_timeout())
        }

        async fn add(&self, _book: &NewBook) -> Result<Book, StorageError> {
            Err(pool_timeout())
        }

        async fn remove(&self, _title: &str) -> Result<u64, StorageError> {
            Err(pool_timeout())
        }

        async fn list(&self) -> Result<Vec<Book>, StorageError> {
            Err(pool_timeout())
        }

        async fn get(&self, _id: i32) -> Result<Option<Book>, StorageError> {
            Err(pool_timeout())
        }
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    async fn run(script: &str) -> String {
        let service = BookService::new(Arc::new(MemoryStorage::new()));
        let mut out = Vec::new();
        run_shell(&service, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"add "The Three Musketeers" "Alexandre Dumas" 1844-03-14"#),
            args(&["add", "The Three Musketeers", "Alexandre Dumas", "1844-03-14"])
        );
        assert_eq!(tokenize("  list  "), args(&["list"]));
        assert_eq!(tokenize(r#"add "" Author"#), args(&["add", "", "Author"]));
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_tokenize_strips_unbalanced_quotes() {
        assert_eq!(tokenize(r#"add "Dune Frank"#), args(&["add", "Dune", "Frank"]));
        assert_eq!(tokenize(r#"remove Dune""#), args(&["remove", "Dune"]));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ShellCommand::parse(args(&["ADD", "Dune", "Frank Herbert"])),
            Some(ShellCommand::Add {
                title: "Dune".into(),
                author: "Frank Herbert".into(),
                release_date: None
            })
        );
        assert_eq!(ShellCommand::parse(args(&["add", "Dune"])), Some(ShellCommand::Usage(ADD_USAGE)));
        assert_eq!(ShellCommand::parse(args(&["remove"])), Some(ShellCommand::Usage(REMOVE_USAGE)));
        assert_eq!(ShellCommand::parse(args(&["Quit"])), Some(ShellCommand::Exit));
        assert_eq!(ShellCommand::parse(args(&["frobnicate"])), Some(ShellCommand::Unknown("frobnicate".into())));
        assert_eq!(ShellCommand::parse(Vec::new()), None);
    }

    #[tokio::test]
    async fn test_session_add_list_remove() {
        let output = run(concat!(
            "add \"Zebra\" \"Z Author\"\n",
            "add \"Dune\" \"Frank Herbert\" 1965-08-01\n",
            "list\n",
            "remove \"dune\"\n",
            "remove \"dune\"\n",
            "exit\n",
            "list\n",
        ))
        .await;

        assert!(output.starts_with(BANNER));
        assert!(output.contains("Added book: \"Dune\" by Frank Herbert (1965-08-01)"));
        assert!(output.contains("Added book: \"Zebra\" by Z Author (N/A)"));
        let dune = output.find("  \"Dune\" by Frank Herbert, released: 1965-08-01").unwrap();
        let zebra = output.find("  \"Zebra\" by Z Author, released: N/A").unwrap();
        assert!(dune < zebra, "list must be ordered by title");
        assert!(output.contains("Removed book titled \"dune\"."));
        assert!(output.contains("No book found with title \"dune\"."));
        assert_eq!(output.matches("Books in database:").count(), 1, "nothing runs after exit");
    }

    #[tokio::test]
    async fn test_session_continues_after_errors() {
        let output = run(concat!(
            "add \"Dune\" \"Frank Herbert\"\n",
            "add \"Dune\" \"Frank Herbert\"\n",
            "add \"\" \"Author\" 2020-01-01\n",
            "add \"Emma\" \"Jane Austen\" 1815-13-23\n",
            "\n",
            "bogus\n",
            "list\n",
        ))
        .await;

        assert!(output.contains("A book with the title \"Dune\" already exists."));
        assert!(output.contains("Invalid input: title must not be empty."));
        assert!(output.contains("Invalid input: release date must be in format YYYY-MM-DD"));
        assert!(output.contains("Unknown command: bogus."));
        assert!(output.contains("  \"Dune\" by Frank Herbert, released: N/A"));
        assert!(!output.contains("Emma\" by"));
    }

    #[tokio::test]
    async fn test_session_survives_storage_failure() {
        let service = BookService::new(Arc::new(UnreachableStorage));
        let script = "list\nadd \"Dune\" \"Frank Herbert\"\nremove \"Dune\"\nhelp\n";
        let mut out = Vec::new();
        run_shell(&service, script.as_bytes(), &mut out).await.unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(output.matches("Error: storage: database error: pool timed out").count(), 3);
        assert!(!output.contains("Added book"));
        assert!(output.contains(HELP), "commands after a failure still run");
    }

    #[tokio::test]
    async fn test_empty_list() {
        let output = run("list\n").await;
        assert!(output.contains("Books in database:\n  (none)"));
    }
}
