//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement, and the categorized error type the upload path surfaces to
//! callers.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors.
///
/// Credential and zone failures get their own variants so the upload path can
/// tell an operator exactly which of the two common misconfigurations they
/// hit, instead of one opaque failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage API key - please check your credentials")]
    Unauthorized,

    #[error("Storage zone not found - please verify the zone name")]
    ZoneNotFound,

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (Bunny Storage, local filesystem) must implement this
/// trait. The catalog works against it without coupling to a specific
/// backend.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a blob under `key` and return its publicly resolvable URL.
    async fn upload(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String>;

    /// Delete the blob stored under `key`.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// The public URL a blob stored under `key` resolves to.
    fn public_url(&self, key: &str) -> String;
}
