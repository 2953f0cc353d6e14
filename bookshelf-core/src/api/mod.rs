//! Typed calls against the catalogue backend

mod auth;
mod authors;
mod books;
mod reviews;

use crate::config::ClientConfig;
use crate::gateway::{Gateway, SessionJar};
use crate::Result;
use std::sync::Arc;

/// Entry point for every backend operation
pub struct BookshelfClient {
    gateway: Gateway,
}

impl BookshelfClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            gateway: Gateway::new(config)?,
        })
    }

    pub fn with_jar(config: ClientConfig, jar: Arc<SessionJar>) -> Result<Self> {
        Ok(Self {
            gateway: Gateway::with_jar(config, jar)?,
        })
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}
