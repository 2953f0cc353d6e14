//! List filters for the book endpoint

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sort key sent as the `ordering` parameter. A leading `-` means descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub descending: bool,
}

impl Ordering {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

impl Default for Ordering {
    /// Newest books first
    fn default() -> Self {
        Self::descending("created_at")
    }
}

impl FromStr for Ordering {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.strip_prefix('-') {
            Some(field) => Self::descending(field),
            None => Self::ascending(s),
        })
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

/// Search, sort and page selection for `GET /api/books/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
    /// 1-indexed; 0 is treated as 1
    pub page: Option<u32>,
}

impl BookQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Query-string pairs, skipping unset and blank filters
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                pairs.push(("search".to_string(), search.to_string()));
            }
        }
        if let Some(ordering) = &self.ordering {
            if !ordering.field.is_empty() {
                pairs.push(("ordering".to_string(), ordering.to_string()));
            }
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.max(1).to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_parse_and_display() {
        let desc: Ordering = "-avg_rating".parse().unwrap();
        assert!(desc.descending);
        assert_eq!(desc.field, "avg_rating");
        assert_eq!(desc.to_string(), "-avg_rating");

        let asc: Ordering = "title".parse().unwrap();
        assert!(!asc.descending);
        assert_eq!(Ordering::default().to_string(), "-created_at");
    }

    #[test]
    fn test_empty_query_has_no_pairs() {
        assert!(BookQuery::new().to_pairs().is_empty());
        assert!(BookQuery::new().search("   ").to_pairs().is_empty());
    }

    #[test]
    fn test_query_pairs() {
        let query = BookQuery::new()
            .search(" dune ")
            .ordering(Ordering::descending("avg_rating"))
            .page(0);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("search".to_string(), "dune".to_string()),
                ("ordering".to_string(), "-avg_rating".to_string()),
                ("page".to_string(), "1".to_string()),
            ]
        );
    }
}
