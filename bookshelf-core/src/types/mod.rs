//! Domain types exchanged with the catalogue backend

mod author;
mod book;
mod field_errors;
mod query;
mod review;
mod user;

pub use author::{Author, AuthorForm};
pub use book::{total_pages, BookDetail, BookForm, BookSummary, Listing, Page, PAGE_SIZE};
pub use field_errors::{FieldErrors, REQUIRED};
pub use query::{BookQuery, Ordering};
pub use review::{Rating, Review, ReviewForm};
pub use user::{Credentials, CurrentUser};
