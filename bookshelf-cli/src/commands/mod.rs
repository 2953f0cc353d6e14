//! CLI command implementations

mod auth;
mod authors;
mod books;
mod output;
mod reviews;

pub use auth::{login, logout, whoami};
pub use authors::{create_author, delete_author, list_authors, update_author};
pub use books::{create_book, delete_book, list_books, show_book, update_book};
pub use output::report;
pub use reviews::{add_review, delete_review, edit_review, list_reviews, show_review};
