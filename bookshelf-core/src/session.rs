//! Saved cookies for short-lived processes
//!
//! A CLI invocation starts with an empty jar, so cookies are written to a JSON
//! file after each run and loaded before the next one.

use crate::error::{ConfigError, SessionError};
use crate::gateway::SessionJar;
use crate::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use url::Url;

pub const ENV_SESSION_FILE: &str = "BOOKSHELF_SESSION_FILE";

/// On-disk form of a session
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SavedSession {
    /// Backend the cookies belong to
    pub base_url: String,
    /// `name=value` pairs
    pub cookies: Vec<String>,
}

impl SavedSession {
    /// Load a session file. A missing file is an empty session.
    pub async fn load(path: &Path) -> std::result::Result<Self, SessionError> {
        match tokio::fs::read_to_string(path).await {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write atomically through a temp file in the same directory.
    ///
    /// The file holds the login cookie, so on Unix it is created readable by
    /// the owner only.
    pub async fn save(&self, path: &Path) -> std::result::Result<(), SessionError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_string_pretty(self)?;

        let temp_path = path.with_extension("json.tmp");
        // A leftover temp file would keep its old mode
        match tokio::fs::remove_file(&temp_path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp_path).await?;
        file.write_all(data.as_bytes()).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&temp_path, path).await?;
        Ok(())
    }
}

/// Location of the session file and the glue between it and a jar
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `BOOKSHELF_SESSION_FILE` if set, else `session.json` in the platform
    /// data directory
    pub fn default_location() -> Result<Self> {
        if let Ok(path) = std::env::var(ENV_SESSION_FILE) {
            return Ok(Self::new(path));
        }
        let dirs =
            ProjectDirs::from("org", "bookshelf", "bookshelf").ok_or(ConfigError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore cookies saved for `base_url` into `jar`.
    /// Sessions recorded for another backend are ignored.
    pub async fn restore(&self, jar: &SessionJar, base_url: &Url) -> Result<usize> {
        let saved = SavedSession::load(&self.path).await?;
        if saved.base_url != base_url.as_str() {
            if !saved.cookies.is_empty() {
                tracing::debug!(
                    saved = %saved.base_url,
                    current = %base_url,
                    "ignoring session saved for another backend"
                );
            }
            return Ok(0);
        }
        let restored = jar.import(base_url, &saved.cookies);
        tracing::debug!(restored, path = %self.path.display(), "session restored");
        Ok(restored)
    }

    /// Save the cookies the jar holds for `base_url`
    pub async fn persist(&self, jar: &SessionJar, base_url: &Url) -> Result<()> {
        let saved = SavedSession {
            base_url: base_url.to_string(),
            cookies: jar.cookie_pairs(base_url),
        };
        saved.save(&self.path).await?;
        Ok(())
    }
}
