//! In-memory storage backend.
//!
//! Holds objects in a bucket/key map. This is the test double for the whole
//! workspace and doubles as a local development backend; it tracks content
//! types and last-modified timestamps the same way a real store would.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};

use crate::{ObjectStore, Result, StorageError};

#[derive(Debug, Clone)]
struct StoredObject {
	data: Vec<u8>,
	content_type: String,
	last_modified: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
	buckets: HashMap<String, HashMap<String, StoredObject>>,
	// "bucket/key" entries of every write and copy, in order
	write_log: Vec<String>,
	// keys for which writes and copies are rejected
	denied: HashSet<String>,
}

/// In-memory object store.
#[derive(Debug, Default)]
pub struct MemoryStore {
	inner: RwLock<Inner>,
}

impl MemoryStore {
	/// Create an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Every write and copy performed so far, as `bucket/key` strings in order.
	pub fn write_log(&self) -> Vec<String> {
		self.inner.read().write_log.clone()
	}

	/// Reject all subsequent writes and copies that target `key`.
	///
	/// Used to exercise partial-failure paths (e.g. one media copy out of a
	/// fan-out rejecting while the others complete).
	pub fn deny_key(&self, key: &str) {
		self.inner.write().denied.insert(key.to_string());
	}

	/// Overwrite the last-modified timestamp of an existing object.
	///
	/// Lets tests age an object for the staleness fallback path.
	pub fn backdate(&self, bucket: &str, key: &str, timestamp: DateTime<Utc>) {
		let mut inner = self.inner.write();
		if let Some(object) = inner
			.buckets
			.get_mut(bucket)
			.and_then(|objects| objects.get_mut(key))
		{
			object.last_modified = timestamp;
		}
	}

	fn put(
		&self,
		bucket: &str,
		key: &str,
		data: Vec<u8>,
		content_type: &str,
	) -> std::result::Result<(), String> {
		let mut inner = self.inner.write();
		if inner.denied.contains(key) {
			return Err(format!("write denied for key {}", key));
		}
		inner.write_log.push(format!("{}/{}", bucket, key));
		inner.buckets.entry(bucket.to_string()).or_default().insert(
			key.to_string(),
			StoredObject {
				data,
				content_type: content_type.to_string(),
				last_modified: Utc::now(),
			},
		);
		Ok(())
	}

	fn get(&self, bucket: &str, key: &str) -> Result<StoredObject> {
		self.inner
			.read()
			.buckets
			.get(bucket)
			.and_then(|objects| objects.get(key))
			.cloned()
			.ok_or_else(|| StorageError::NotFound {
				bucket: bucket.to_string(),
				key: key.to_string(),
			})
	}
}

#[async_trait]
impl ObjectStore for MemoryStore {
	async fn create(&self, bucket: &str, key: &str, data: &JsonValue) -> Result<()> {
		let bytes = serde_json::to_vec(data)
			.map_err(|e| StorageError::Create(e.to_string()))?;
		self.put(bucket, key, bytes, "application/json")
			.map_err(StorageError::Create)
	}

	async fn create_html(&self, bucket: &str, key: &str, html: &str) -> Result<()> {
		self.put(bucket, key, html.as_bytes().to_vec(), "text/html")
			.map_err(StorageError::Create)
	}

	async fn read(&self, bucket: &str, key: &str) -> Result<JsonValue> {
		let object = self.get(bucket, key)?;
		serde_json::from_slice(&object.data).map_err(|e| StorageError::InvalidJson {
			key: key.to_string(),
			message: e.to_string(),
		})
	}

	async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
		let mut inner = self.inner.write();
		if let Some(objects) = inner.buckets.get_mut(bucket) {
			objects.remove(key);
		}
		Ok(())
	}

	async fn create_media(
		&self,
		bucket: &str,
		key: &str,
		data: &[u8],
		content_type: &str,
	) -> Result<()> {
		self.put(bucket, key, data.to_vec(), content_type)
			.map_err(StorageError::CreateMedia)
	}

	async fn read_media(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
		Ok(self.get(bucket, key)?.data)
	}

	async fn list_media(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
		let inner = self.inner.read();
		let mut keys: Vec<String> = inner
			.buckets
			.get(bucket)
			.map(|objects| {
				objects
					.keys()
					.filter(|key| key.starts_with(prefix))
					.cloned()
					.collect()
			})
			.unwrap_or_default();
		keys.sort();
		Ok(keys)
	}

	async fn copy_object(
		&self,
		src_bucket: &str,
		src_key: &str,
		dst_bucket: &str,
		dst_key: &str,
	) -> Result<()> {
		let source = self.get(src_bucket, src_key).map_err(|e| match e {
			StorageError::NotFound { .. } => StorageError::Copy(format!(
				"source object not found: {}/{}",
				src_bucket, src_key
			)),
			other => other,
		})?;
		self.put(dst_bucket, dst_key, source.data, &source.content_type)
			.map_err(StorageError::Copy)
	}

	async fn last_modified(&self, bucket: &str, key: &str) -> Result<DateTime<Utc>> {
		Ok(self.get(bucket, key)?.last_modified)
	}
}
