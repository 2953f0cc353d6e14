//! Bookshelf Core Library
//!
//! Client for the book catalogue REST backend. Every request goes through the
//! [`gateway::Gateway`], which attaches session cookies and the CSRF token to
//! state-changing calls. [`BookshelfClient`] wraps it with typed operations for
//! books, authors, reviews and sign-in.

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod types;

pub use api::BookshelfClient;
pub use config::ClientConfig;
pub use error::{BookshelfError, ConfigError, GatewayError, Result, SessionError};
pub use gateway::{ApiResponse, Gateway, RequestBody, RequestDescriptor, SessionJar};
pub use session::{SavedSession, SessionFile};
pub use types::{
    Author, AuthorForm, BookDetail, BookForm, BookQuery, BookSummary, Credentials, CurrentUser,
    FieldErrors, Ordering, Page, Rating, Review, ReviewForm,
};
