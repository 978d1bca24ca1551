//! Storage backend selection from configuration.

use crate::{BunnyStorage, LocalStorage, Storage, StorageError, StorageResult};
use linktrend_core::{Config, StorageBackendKind};
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackendKind::Bunny => {
            let storage_zone = config.bunny_storage_zone.clone().ok_or_else(|| {
                StorageError::ConfigError("BUNNY_STORAGE_ZONE not configured".to_string())
            })?;
            let api_key = config.bunny_api_key.clone().ok_or_else(|| {
                StorageError::ConfigError("BUNNY_API_KEY not configured".to_string())
            })?;
            let cdn_hostname = config.bunny_cdn_hostname.clone().ok_or_else(|| {
                StorageError::ConfigError("BUNNY_CDN_HOSTNAME not configured".to_string())
            })?;

            Ok(Arc::new(BunnyStorage::new(
                storage_zone,
                api_key,
                cdn_hostname,
            )))
        }
        StorageBackendKind::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }
    }
}
