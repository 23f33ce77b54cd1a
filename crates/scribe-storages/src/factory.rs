//! Factory function for creating object stores.

use crate::{ObjectStore, Result, StorageConfig};
use std::sync::Arc;

/// Create an object store from configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use scribe_storages::{StorageConfig, create_store};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = StorageConfig::from_env()?;
///     let store = create_store(config).await?;
///     # let _ = store;
///     Ok(())
/// }
/// ```
pub async fn create_store(config: StorageConfig) -> Result<Arc<dyn ObjectStore>> {
	match config {
		#[cfg(feature = "s3")]
		StorageConfig::S3(s3_config) => {
			let store = crate::backends::s3::S3Store::new(s3_config).await;
			Ok(Arc::new(store))
		}
		#[cfg(feature = "memory")]
		StorageConfig::Memory => Ok(Arc::new(crate::backends::memory::MemoryStore::new())),
	}
}
