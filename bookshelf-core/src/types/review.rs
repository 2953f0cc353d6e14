//! Reviews, star ratings and the review form

use super::field_errors::{FieldErrors, REQUIRED};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reader review attached to a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    #[serde(alias = "id")]
    pub review_id: u64,
    #[serde(default)]
    pub book_id: Option<u64>,
    pub user_id: u64,
    #[serde(default)]
    pub user_name: String,
    pub content: String,
    pub rating: u8,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Star rating between 1 and 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    /// Ratings left unset count as five stars
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields submitted when posting or editing a review.
///
/// The rating is kept raw so that an out-of-range value is reported as a
/// field error instead of being rejected at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewForm {
    pub book_id: u64,
    pub content: String,
    pub rating: Option<u8>,
}

/// Wire body for review create and update
#[derive(Debug, Serialize)]
pub(crate) struct ReviewBody<'a> {
    pub book_id: u64,
    pub content: &'a str,
    pub rating: Rating,
}

impl ReviewForm {
    pub fn new(book_id: u64, content: impl Into<String>, rating: Option<u8>) -> Self {
        Self {
            book_id,
            content: content.into(),
            rating,
        }
    }

    /// Effective rating, defaulting to five stars when unset
    pub fn rating(&self) -> Option<Rating> {
        match self.rating {
            Some(value) => Rating::new(value),
            None => Some(Rating::default()),
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        let mut errors = FieldErrors::new();
        if self.content.trim().is_empty() {
            errors.add("content", REQUIRED);
        }
        if self.rating().is_none() {
            errors.add(
                "rating",
                format!(
                    "Rating must be between {} and {}.",
                    Rating::MIN,
                    Rating::MAX
                ),
            );
        }
        errors.into_result()
    }

    pub(crate) fn body(&self) -> crate::Result<ReviewBody<'_>> {
        self.validate()?;
        Ok(ReviewBody {
            book_id: self.book_id,
            content: &self.content,
            rating: self.rating().unwrap_or_default(),
        })
    }
}
