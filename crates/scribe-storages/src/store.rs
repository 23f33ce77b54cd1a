//! Object store trait definition.

use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

/// Capability interface for bucket-addressed blob storage.
///
/// This trait defines the contract the CMS core depends on: CRUD for JSON
/// documents, HTML exports and binary media, prefix listing, server-side copy
/// and a last-modified lookup (used by the metadata staleness guard).
///
/// `update` and `update_media` are defined as their create counterparts:
/// writes are full overwrites with no versioning at this layer.
///
/// # Examples
///
/// ```rust,no_run
/// use scribe_storages::{ObjectStore, Result};
/// use serde_json::json;
///
/// async fn example(store: &dyn ObjectStore) -> Result<()> {
///     store.create("stage", "posts/p1", &json!({"title": "Draft"})).await?;
///
///     let keys = store.list_media("stage", "media/").await?;
///     for key in keys {
///         store.copy_object("stage", &key, "publish", &key).await?;
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ObjectStore: Send + Sync {
	/// Write a JSON document at `bucket`/`key`, overwriting any existing object.
	///
	/// # Errors
	///
	/// Returns `` `StorageError::Create` `` if the write is rejected.
	async fn create(&self, bucket: &str, key: &str, data: &JsonValue) -> Result<()>;

	/// Write an HTML document at `bucket`/`key` with a `text/html` content type.
	///
	/// # Errors
	///
	/// Returns `` `StorageError::Create` `` if the write is rejected.
	async fn create_html(&self, bucket: &str, key: &str, html: &str) -> Result<()>;

	/// Read and parse the JSON document at `bucket`/`key`.
	///
	/// # Errors
	///
	/// Returns `` `StorageError::NotFound` `` if the object doesn't exist and
	/// `` `StorageError::InvalidJson` `` if it exists but is not valid JSON.
	async fn read(&self, bucket: &str, key: &str) -> Result<JsonValue>;

	/// Overwrite the JSON document at `bucket`/`key`.
	///
	/// Defined as [`create`](Self::create): there is no read-modify-write or
	/// version check at this layer.
	async fn update(&self, bucket: &str, key: &str, data: &JsonValue) -> Result<()> {
		self.create(bucket, key, data).await
	}

	/// Delete the object at `bucket`/`key`.
	///
	/// # Errors
	///
	/// Returns `` `StorageError::Delete` `` if the delete is rejected.
	async fn delete(&self, bucket: &str, key: &str) -> Result<()>;

	/// Write a binary media blob with an explicit content type.
	async fn create_media(
		&self,
		bucket: &str,
		key: &str,
		data: &[u8],
		content_type: &str,
	) -> Result<()>;

	/// Read the raw bytes of the media blob at `bucket`/`key`.
	async fn read_media(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

	/// Overwrite a media blob. Defined as [`create_media`](Self::create_media).
	async fn update_media(
		&self,
		bucket: &str,
		key: &str,
		data: &[u8],
		content_type: &str,
	) -> Result<()> {
		self.create_media(bucket, key, data, content_type).await
	}

	/// Delete a media blob. Defined as [`delete`](Self::delete).
	async fn delete_media(&self, bucket: &str, key: &str) -> Result<()> {
		self.delete(bucket, key).await
	}

	/// List the keys under `prefix` in `bucket`.
	///
	/// Returns keys only. No matches yields an empty vector, never an error.
	async fn list_media(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;

	/// Server-side copy from `src_bucket`/`src_key` to `dst_bucket`/`dst_key`.
	///
	/// No bytes transit the caller.
	async fn copy_object(
		&self,
		src_bucket: &str,
		src_key: &str,
		dst_bucket: &str,
		dst_key: &str,
	) -> Result<()>;

	/// Get the object's last-modified timestamp.
	///
	/// Used as the staleness fallback when a metadata record carries no
	/// `publishedDate` of its own.
	async fn last_modified(&self, bucket: &str, key: &str) -> Result<DateTime<Utc>>;
}
