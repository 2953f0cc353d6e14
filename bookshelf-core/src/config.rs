//! Client configuration
//!
//! One backend base URL plus the names of the CSRF cookie and header. Values
//! come from the environment with fallbacks to the defaults below, and the CLI
//! may override them afterwards.

use crate::error::ConfigError;
use reqwest::header::HeaderName;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Path of the endpoint that sets the CSRF cookie
pub const CSRF_PATH: &str = "/api/csrf/";

pub const ENV_BASE_URL: &str = "BOOKSHELF_API_URL";
pub const ENV_CSRF_COOKIE: &str = "BOOKSHELF_CSRF_COOKIE";
pub const ENV_CSRF_HEADER: &str = "BOOKSHELF_CSRF_HEADER";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    csrf_cookie: String,
    csrf_header: HeaderName,
}

impl ClientConfig {
    /// Configuration for the given backend with default CSRF names
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            csrf_cookie: DEFAULT_CSRF_COOKIE.to_string(),
            csrf_header: parse_header_name(DEFAULT_CSRF_HEADER)?,
        })
    }

    /// Read `BOOKSHELF_API_URL`, `BOOKSHELF_CSRF_COOKIE` and `BOOKSHELF_CSRF_HEADER`
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Ok(cookie) = std::env::var(ENV_CSRF_COOKIE) {
            config = config.with_csrf_cookie(cookie);
        }
        if let Ok(header) = std::env::var(ENV_CSRF_HEADER) {
            config = config.with_csrf_header(&header)?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_csrf_cookie(mut self, name: impl Into<String>) -> Self {
        self.csrf_cookie = name.into();
        self
    }

    pub fn with_csrf_header(mut self, name: &str) -> Result<Self, ConfigError> {
        self.csrf_header = parse_header_name(name)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn csrf_cookie(&self) -> &str {
        &self.csrf_cookie
    }

    pub fn csrf_header(&self) -> &HeaderName {
        &self.csrf_header
    }

    /// Resolve an API path against the base URL.
    ///
    /// Paths are taken relative to the base, so a base of
    /// `https://host/catalogue/` keeps its prefix. Absolute URLs pass through.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|_| ConfigError::InvalidHeaderName(name.to_string()))
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }

    // Directory form so relative joins keep any path prefix
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
