//! Local filesystem storage implementation (development and tests).

use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;

#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:5000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Convert a storage key to a filesystem path, rejecting traversal.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, key: &str, _content_type: &str, data: Bytes) -> StorageResult<String> {
        let path = self.key_to_path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        }

        fs::write(&path, &data)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::DeleteFailed(e.to_string())),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:5000/media".to_string())
            .await
            .unwrap();

        let url = storage
            .upload("videos/1_clip.mp4", "video/mp4", Bytes::from_static(b"abc"))
            .await
            .unwrap();
        assert_eq!(url, "http://localhost:5000/media/videos/1_clip.mp4");
        assert_eq!(
            std::fs::read(dir.path().join("videos/1_clip.mp4")).unwrap(),
            b"abc"
        );

        storage.delete("videos/1_clip.mp4").await.unwrap();
        assert!(matches!(
            storage.delete("videos/1_clip.mp4").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost".to_string())
            .await
            .unwrap();

        assert!(matches!(
            storage
                .upload("../escape", "video/mp4", Bytes::new())
                .await,
            Err(StorageError::InvalidKey(_))
        ));
    }
}
