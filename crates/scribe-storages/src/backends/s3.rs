//! Amazon S3 storage backend implementation.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::S3Config;
use crate::{ObjectStore, Result, StorageError};

/// S3-backed object store.
#[derive(Debug, Clone)]
pub struct S3Store {
	client: Client,
}

impl S3Store {
	/// Create a new S3 store from the ambient AWS credential chain.
	pub async fn new(config: S3Config) -> Self {
		let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
		if let Some(region) = config.region {
			loader = loader.region(aws_config::Region::new(region));
		}
		let shared = loader.load().await;

		let mut builder = aws_sdk_s3::config::Builder::from(&shared);
		if let Some(endpoint) = config.endpoint {
			// Path-style addressing for LocalStack/MinIO endpoints
			builder = builder.endpoint_url(endpoint).force_path_style(true);
		}

		Self {
			client: Client::from_conf(builder.build()),
		}
	}

	/// Wrap an already-configured S3 client.
	pub fn from_client(client: Client) -> Self {
		Self { client }
	}

	async fn put(
		&self,
		bucket: &str,
		key: &str,
		body: Vec<u8>,
		content_type: &str,
	) -> std::result::Result<(), String> {
		self.client
			.put_object()
			.bucket(bucket)
			.key(key)
			.body(ByteStream::from(body))
			.content_type(content_type)
			.send()
			.await
			.map_err(|e| e.to_string())?;
		Ok(())
	}

	async fn get_bytes(&self, bucket: &str, key: &str) -> std::result::Result<Vec<u8>, String> {
		let response = self
			.client
			.get_object()
			.bucket(bucket)
			.key(key)
			.send()
			.await
			.map_err(|e| e.to_string())?;
		let data = response.body.collect().await.map_err(|e| e.to_string())?;
		Ok(data.into_bytes().to_vec())
	}
}

#[async_trait]
impl ObjectStore for S3Store {
	async fn create(&self, bucket: &str, key: &str, data: &JsonValue) -> Result<()> {
		let bytes = serde_json::to_vec(data)
			.map_err(|e| StorageError::Create(e.to_string()))?;
		self.put(bucket, key, bytes, "application/json")
			.await
			.map_err(StorageError::Create)
	}

	async fn create_html(&self, bucket: &str, key: &str, html: &str) -> Result<()> {
		self.put(bucket, key, html.as_bytes().to_vec(), "text/html")
			.await
			.map_err(StorageError::Create)
	}

	async fn read(&self, bucket: &str, key: &str) -> Result<JsonValue> {
		let bytes = self
			.get_bytes(bucket, key)
			.await
			.map_err(StorageError::Read)?;
		debug!(bucket, key, bytes = bytes.len(), "read object");
		serde_json::from_slice(&bytes).map_err(|e| StorageError::InvalidJson {
			key: key.to_string(),
			message: e.to_string(),
		})
	}

	async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
		self.client
			.delete_object()
			.bucket(bucket)
			.key(key)
			.send()
			.await
			.map_err(|e| StorageError::Delete(e.to_string()))?;
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
			.await
			.map_err(StorageError::CreateMedia)
	}

	async fn read_media(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
		self.get_bytes(bucket, key)
			.await
			.map_err(StorageError::ReadMedia)
	}

	async fn list_media(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
		let response = self
			.client
			.list_objects_v2()
			.bucket(bucket)
			.prefix(prefix)
			.send()
			.await
			.map_err(|e| StorageError::ListMedia(e.to_string()))?;
		Ok(response
			.contents()
			.iter()
			.filter_map(|object| object.key().map(str::to_string))
			.collect())
	}

	async fn copy_object(
		&self,
		src_bucket: &str,
		src_key: &str,
		dst_bucket: &str,
		dst_key: &str,
	) -> Result<()> {
		self.client
			.copy_object()
			.copy_source(format!("{}/{}", src_bucket, src_key))
			.bucket(dst_bucket)
			.key(dst_key)
			.send()
			.await
			.map_err(|e| StorageError::Copy(e.to_string()))?;
		Ok(())
	}

	async fn last_modified(&self, bucket: &str, key: &str) -> Result<DateTime<Utc>> {
		let response = self
			.client
			.head_object()
			.bucket(bucket)
			.key(key)
			.send()
			.await
			.map_err(|e| StorageError::Read(e.to_string()))?;
		let modified = response.last_modified().ok_or_else(|| StorageError::NotFound {
			bucket: bucket.to_string(),
			key: key.to_string(),
		})?;
		DateTime::<Utc>::from_timestamp(modified.secs(), modified.subsec_nanos())
			.ok_or_else(|| StorageError::Read(format!("invalid timestamp for {}", key)))
	}
}
