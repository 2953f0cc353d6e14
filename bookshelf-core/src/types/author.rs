//! Author records and the author form

use super::field_errors::{FieldErrors, REQUIRED};
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub id: u64,
    pub name: String,
}

/// Fields submitted when registering or renaming an author
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AuthorForm {
    pub name: String,
}

impl AuthorForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> crate::Result<()> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", REQUIRED);
        }
        errors.into_result()
    }

    pub fn to_multipart(&self) -> Form {
        Form::new().text("name", self.name.clone())
    }
}
