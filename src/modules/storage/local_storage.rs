//! Local filesystem media storage
//!
//! Files are addressed by name only; the name stored on a report is the
//! only link between the record and the file on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::MediaConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid media name: {0}")]
    InvalidName(String),

    #[error("{0}")]
    InvalidDataUrl(String),
}

/// Destination for report photos
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Write `data` under `name`, replacing any existing file with that name
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Public URL a browser can load the file from
    fn url_for(&self, name: &str) -> String;
}

/// Media storage backed by a local directory
pub struct LocalMediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl LocalMediaStorage {
    /// Create the storage, making sure the directory exists
    pub async fn new(config: &MediaConfig) -> Result<Self, StorageError> {
        let storage = Self {
            root: PathBuf::from(&config.upload_dir),
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
        };

        storage.ensure_dir_exists().await?;

        info!(
            "Media storage initialized at {} (served under {})",
            storage.root.display(),
            storage.url_prefix
        );

        Ok(storage)
    }

    pub async fn ensure_dir_exists(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a stored name to a path inside the root directory
    fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        let is_plain = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";

        if !is_plain {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(name))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, data).await?;

        debug!("Stored media {} ({} bytes)", path.display(), data.len());
        Ok(())
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.url_prefix, urlencoding::encode(name))
    }
}
