//! Authenticated request gateway
//!
//! Every call to the backend goes through [`Gateway::dispatch`]. Unsafe
//! methods get the anti-forgery token read from the `csrftoken` cookie, and
//! the token endpoint is only hit when that cookie is missing. Cookies ride
//! along on every request through the shared [`SessionJar`].

mod jar;
mod request;
mod response;

pub use jar::{find_cookie, SessionJar};
pub use request::{RequestBody, RequestDescriptor};
pub use response::ApiResponse;

use crate::config::{ClientConfig, CSRF_PATH};
use crate::error::GatewayError;
use reqwest::header::{HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Response};
use std::sync::Arc;

pub struct Gateway {
    client: Client,
    /// No cookie provider. Carries requests that bring their own `Cookie`
    /// header so responses never write into `jar`.
    detached: Client,
    jar: Arc<SessionJar>,
    config: ClientConfig,
}

impl Gateway {
    /// Gateway with a fresh, empty cookie jar
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        Self::with_jar(config, Arc::new(SessionJar::new()))
    }

    /// Gateway sharing an existing jar, e.g. one restored from disk
    pub fn with_jar(config: ClientConfig, jar: Arc<SessionJar>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()?;
        let detached = Client::builder().build()?;
        Ok(Self {
            client,
            detached,
            jar,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn jar(&self) -> &Arc<SessionJar> {
        &self.jar
    }

    /// Current CSRF token, read from the cookie jar
    pub fn csrf_token(&self) -> Option<String> {
        self.jar
            .cookie_value(self.config.base_url(), self.config.csrf_cookie())
    }

    /// Make sure a CSRF cookie exists, asking the backend for one if not
    pub async fn ensure_token(&self) -> Result<(), GatewayError> {
        if self.csrf_token().is_some() {
            return Ok(());
        }
        self.issue_token().await.map(|_| ())
    }

    async fn issue_token(&self) -> Result<u16, GatewayError> {
        let url = self.config.endpoint(CSRF_PATH)?;
        tracing::info!(%url, "requesting CSRF token");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::TokenUnavailable {
                status: status.as_u16(),
            });
        }
        Ok(status.as_u16())
    }

    async fn resolve_token(&self) -> Result<String, GatewayError> {
        if let Some(token) = self.csrf_token() {
            return Ok(token);
        }
        let status = self.issue_token().await?;
        self.csrf_token()
            .ok_or(GatewayError::TokenUnavailable { status })
    }

    /// Send a request and return the raw response.
    ///
    /// Unsafe methods carry the CSRF header unless the caller set it. JSON
    /// is the default Content-Type except for multipart bodies, whose
    /// boundary the transport writes. A descriptor with its own `Cookie`
    /// header is sent as is, without the jar.
    pub async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<Response, GatewayError> {
        let RequestDescriptor {
            method,
            path,
            query,
            body,
            mut headers,
        } = descriptor;

        let unsafe_method = !method.is_safe();
        let url = self.config.endpoint(&path)?;

        if unsafe_method {
            let token = self.resolve_token().await?;
            let header = self.config.csrf_header();
            if !headers.contains_key(header) {
                headers.insert(header.clone(), HeaderValue::from_str(&token)?);
            }
        }

        if !body.is_multipart() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        tracing::debug!(%method, %url, "dispatching request");

        let client = if headers.contains_key(COOKIE) {
            &self.detached
        } else {
            &self.client
        };
        let mut builder = client.request(method, url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        Ok(builder.send().await?)
    }

    /// [`dispatch`](Self::dispatch) followed by response normalization
    pub async fn send(&self, descriptor: RequestDescriptor) -> Result<ApiResponse, GatewayError> {
        let response = self.dispatch(descriptor).await?;
        ApiResponse::read(response).await
    }
}
