//! Book records and the book form

use super::field_errors::{FieldErrors, REQUIRED};
use super::{Author, Review};
use chrono::NaiveDate;
use reqwest::multipart::Form;
use serde::{Deserialize, Deserializer, Serialize};

/// Number of books the backend returns per list page
pub const PAGE_SIZE: u64 = 10;

/// Number of pages needed to show `count` books
pub fn total_pages(count: u64) -> u64 {
    count.div_ceil(PAGE_SIZE)
}

/// One page of a paginated listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        total_pages(self.count)
    }
}

/// Either a paginated page or a bare list, depending on the endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(Page<T>),
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Paged(page) => page.results,
            Self::Plain(items) => items,
        }
    }
}

/// A row in the book list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl BookSummary {
    pub fn published_date(&self) -> Option<NaiveDate> {
        parse_date(self.published_at.as_deref())
    }
}

/// A single book with its author and reviews
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookDetail {
    pub id: u64,
    pub title: String,
    pub author: Author,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl BookDetail {
    pub fn published_date(&self) -> Option<NaiveDate> {
        parse_date(self.published_at.as_deref())
    }
}

/// Fields submitted when creating or editing a book
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BookForm {
    pub title: String,
    /// Author id as chosen from the author list
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl BookForm {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            published_at: None,
        }
    }

    pub fn with_published_at(mut self, date: impl Into<String>) -> Self {
        self.published_at = Some(date.into());
        self
    }

    /// Check required fields before anything is sent
    pub fn validate(&self) -> crate::Result<()> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", REQUIRED);
        }
        if self.author.trim().is_empty() {
            errors.add("author", REQUIRED);
        }
        errors.into_result()
    }

    /// Multipart rendition used by the edit endpoint
    pub fn to_multipart(&self) -> Form {
        let form = Form::new()
            .text("title", self.title.clone())
            .text("author", self.author.clone());
        match &self.published_at {
            Some(date) => form.text("published_at", date.clone()),
            None => form,
        }
    }
}

/// Accept either a JSON number or a decimal string such as `"4.50"`
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Dates arrive either as `YYYY-MM-DD` or as a full timestamp
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
