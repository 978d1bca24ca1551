//! Bunny Storage backend
//!
//! Talks to the Bunny Storage HTTP API (`PUT`/`DELETE
//! https://storage.bunnycdn.com/{zone}/{key}` with an `AccessKey` header) and
//! builds public URLs from the configured CDN hostname.

use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

const BUNNY_STORAGE_API: &str = "https://storage.bunnycdn.com";

/// Bunny Storage implementation
#[derive(Clone)]
pub struct BunnyStorage {
    client: reqwest::Client,
    storage_zone: String,
    api_key: String,
    cdn_hostname: String,
    endpoint: String,
}

impl BunnyStorage {
    /// Create a new BunnyStorage instance
    ///
    /// # Arguments
    /// * `storage_zone` - Bunny storage zone name
    /// * `api_key` - Storage zone password (the `AccessKey` header value)
    /// * `cdn_hostname` - Pull-zone hostname public URLs resolve through
    ///   (e.g. "myzone.b-cdn.net")
    pub fn new(storage_zone: String, api_key: String, cdn_hostname: String) -> Self {
        BunnyStorage {
            client: reqwest::Client::new(),
            storage_zone,
            api_key,
            cdn_hostname,
            endpoint: BUNNY_STORAGE_API.to_string(),
        }
    }

    /// Point the backend at a different storage API endpoint (tests).
    #[doc(hidden)]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    fn object_url(&self, key: &str) -> StorageResult<String> {
        validate_key(key)?;
        Ok(format!("{}/{}/{}", self.endpoint, self.storage_zone, key))
    }
}

fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.starts_with('/') || key.contains("..") {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[async_trait]
impl Storage for BunnyStorage {
    async fn upload(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String> {
        let url = self.object_url(key)?;
        tracing::debug!(key = %key, size = data.len(), "Uploading to Bunny Storage");

        let response = self
            .client
            .put(&url)
            .header("AccessKey", &self.api_key)
            .header("Content-Type", content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        match response.status() {
            s if s.is_success() => Ok(self.public_url(key)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StorageError::Unauthorized),
            StatusCode::NOT_FOUND => Err(StorageError::ZoneNotFound),
            s => {
                let body = response.text().await.unwrap_or_default();
                Err(StorageError::BackendError(format!(
                    "Upload returned {}: {}",
                    s, body
                )))
            }
        }
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let url = self.object_url(key)?;

        let response = self
            .client
            .delete(&url)
            .header("AccessKey", &self.api_key)
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StorageError::Unauthorized),
            StatusCode::NOT_FOUND => Err(StorageError::NotFound(key.to_string())),
            s => Err(StorageError::DeleteFailed(format!(
                "Delete returned {}",
                s
            ))),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://{}/{}", self.cdn_hostname, key)
    }
}
