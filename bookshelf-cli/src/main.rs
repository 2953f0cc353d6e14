//! Bookshelf CLI - Command-line client for the book catalogue

mod commands;

use anyhow::Result;
use bookshelf_core::{BookshelfClient, ClientConfig, SessionFile, SessionJar};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate a page argument (must be at least 1)
fn parse_page(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("page must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Parse and validate a star rating (1 to 5)
fn parse_rating(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| format!("'{}' is not a valid rating", s))?;
    if (1..=5).contains(&n) {
        Ok(n)
    } else {
        Err("rating must be between 1 and 5".to_string())
    }
}

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL (overrides BOOKSHELF_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Where cookies are kept between runs (overrides BOOKSHELF_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the catalogue
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Browse and manage books
    #[command(subcommand)]
    Books(BookCommand),

    /// Browse and manage authors
    #[command(subcommand)]
    Authors(AuthorCommand),

    /// Browse and manage reviews
    #[command(subcommand)]
    Reviews(ReviewCommand),
}

#[derive(Subcommand)]
enum BookCommand {
    /// List books, newest first unless another ordering is given
    List {
        /// Title search text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort field, prefix with '-' for descending (e.g. -avg_rating)
        #[arg(short, long)]
        ordering: Option<String>,

        /// Page number (must be at least 1)
        #[arg(short, long, value_parser = parse_page)]
        page: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a book with its reviews
    Show {
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a new book
    Create {
        #[arg(short, long)]
        title: String,

        /// Author id
        #[arg(short, long)]
        author: String,

        /// Publication date (YYYY-MM-DD)
        #[arg(long)]
        published_at: Option<String>,
    },

    /// Edit a book
    Update {
        id: u64,

        #[arg(short, long)]
        title: String,

        /// Author id
        #[arg(short, long)]
        author: String,

        /// Publication date (YYYY-MM-DD)
        #[arg(long)]
        published_at: Option<String>,
    },

    /// Delete a book
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum AuthorCommand {
    /// List authors
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a new author
    Create { name: String },

    /// Rename an author
    Update { id: u64, name: String },

    /// Delete an author
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum ReviewCommand {
    /// List reviews of a book
    List {
        book_id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single review
    Show {
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Review a book
    Add {
        book_id: u64,

        #[arg(short, long)]
        content: String,

        /// Stars from 1 to 5 (defaults to 5)
        #[arg(short, long, value_parser = parse_rating)]
        rating: Option<u8>,
    },

    /// Edit one of your reviews
    Edit {
        id: u64,

        /// Book the review belongs to
        #[arg(short, long)]
        book: u64,

        #[arg(short, long)]
        content: String,

        /// Stars from 1 to 5 (defaults to 5)
        #[arg(short, long, value_parser = parse_rating)]
        rating: Option<u8>,
    },

    /// Delete one of your reviews
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bookshelf_cli=debug,bookshelf_core=debug"
    } else {
        "bookshelf_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }

    let session = match cli.session_file {
        Some(path) => SessionFile::new(path),
        None => SessionFile::default_location()?,
    };

    let jar = Arc::new(SessionJar::new());
    if let Err(e) = session.restore(&jar, config.base_url()).await {
        tracing::warn!("Failed to restore session, starting fresh: {}", e);
    }

    let client = BookshelfClient::with_jar(config.clone(), Arc::clone(&jar))?;
    let result = run(&client, cli.command).await;

    if let Err(e) = session.persist(&jar, config.base_url()).await {
        tracing::warn!("Failed to save session to {}: {}", session.path().display(), e);
    }

    result.map_err(commands::report)
}

async fn run(client: &BookshelfClient, command: Commands) -> Result<()> {
    match command {
        Commands::Login { username, password } => {
            commands::login(client, &username, &password).await
        }

        Commands::Logout => commands::logout(client).await,

        Commands::Whoami => commands::whoami(client).await,

        Commands::Books(command) => match command {
            BookCommand::List {
                search,
                ordering,
                page,
                json,
            } => commands::list_books(client, search, ordering, page, json).await,
            BookCommand::Show { id, json } => commands::show_book(client, id, json).await,
            BookCommand::Create {
                title,
                author,
                published_at,
            } => commands::create_book(client, &title, &author, published_at).await,
            BookCommand::Update {
                id,
                title,
                author,
                published_at,
            } => commands::update_book(client, id, &title, &author, published_at).await,
            BookCommand::Delete { id } => commands::delete_book(client, id).await,
        },

        Commands::Authors(command) => match command {
            AuthorCommand::List { json } => commands::list_authors(client, json).await,
            AuthorCommand::Create { name } => commands::create_author(client, &name).await,
            AuthorCommand::Update { id, name } => {
                commands::update_author(client, id, &name).await
            }
            AuthorCommand::Delete { id } => commands::delete_author(client, id).await,
        },

        Commands::Reviews(command) => match command {
            ReviewCommand::List { book_id, json } => {
                commands::list_reviews(client, book_id, json).await
            }
            ReviewCommand::Show { id, json } => commands::show_review(client, id, json).await,
            ReviewCommand::Add {
                book_id,
                content,
                rating,
            } => commands::add_review(client, book_id, &content, rating).await,
            ReviewCommand::Edit {
                id,
                book,
                content,
                rating,
            } => commands::edit_review(client, id, book, &content, rating).await,
            ReviewCommand::Delete { id } => commands::delete_review(client, id).await,
        },
    }
}
