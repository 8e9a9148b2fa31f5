mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use bookshelf_core::{DEFAULT_HTTP_PORT, DatabaseConfig};
use bookshelf_service::BookService;
use bookshelf_storage::{BookStore, MemoryStorage, PgStorage};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::books::{add_book, list_books, remove_book};

#[derive(Parser)]
#[command(name = "bookshelf", version)]
#[command(about = "Book catalog manager: interactive shell, one-shot commands and HTTP API", long_about = None)]
struct Cli {
    /// PostgreSQL connection URL (falls back to PG_CONN, then a local default)
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Keep books in process memory instead of PostgreSQL
    #[arg(long, global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive shell (default)
    Shell,
    /// Create the books table if it does not exist
    Init,
    /// Add a book
    Add {
        title: String,
        author: String,
        /// Release date as YYYY-MM-DD
        release_date: Option<String>,
    },
    /// Remove books whose title matches (case-insensitive)
    Remove { title: String },
    /// List all books ordered by title
    List,
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn open_book_service(cli: &Cli) -> Result<BookService> {
    let storage: Arc<dyn BookStore> = if cli.in_memory {
        tracing::info!("using in-memory book store");
        Arc::new(MemoryStorage::new())
    } else {
        let config = DatabaseConfig::from_env(cli.database_url.clone());
        Arc::new(PgStorage::connect(&config).await?)
    };
    let service = BookService::new(storage);
    service.initialize().await?;
    Ok(service)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    init_tracing(if serving { "info" } else { "warn" });

    let service = open_book_service(&cli).await?;
    let mut stdout = std::io::stdout();

    let succeeded = match cli.command {
        None | Some(Commands::Shell) => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::shell::run_shell(&service, stdin, &mut stdout).await?;
            true
        },
        Some(Commands::Init) => {
            println!("Books table is ready.");
            true
        },
        Some(Commands::Add { title, author, release_date }) => {
            add_book(&service, &mut stdout, &title, &author, release_date.as_deref()).await?
        },
        Some(Commands::Remove { title }) => remove_book(&service, &mut stdout, &title).await?,
        Some(Commands::List) => list_books(&service, &mut stdout).await?,
        Some(Commands::Serve { port, host }) => {
            commands::serve::run(service, port, host).await?;
            true
        },
    };

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
