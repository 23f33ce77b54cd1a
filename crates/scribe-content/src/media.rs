//! Media library: uploads and listings for the editor's image picker.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use scribe_storages::ObjectStore;

use crate::config::CmsConfig;
use crate::document::clean_url;
use crate::CmsResult;

/// Upload, list and address media objects in the stage store.
pub struct MediaLibrary {
	store: Arc<dyn ObjectStore>,
	config: CmsConfig,
}

impl MediaLibrary {
	pub fn new(store: Arc<dyn ObjectStore>, config: CmsConfig) -> Self {
		Self { store, config }
	}

	/// Key a fresh upload will be stored under.
	///
	/// The millisecond timestamp prefix keeps repeated uploads of the same
	/// filename from clobbering each other.
	pub fn upload_key(&self, filename: &str) -> String {
		format!(
			"{}{}_{}",
			self.config.media_prefix,
			Utc::now().timestamp_millis(),
			filename
		)
	}

	/// Upload a media object and return the key it was stored under.
	pub async fn upload(
		&self,
		filename: &str,
		data: Vec<u8>,
		content_type: &str,
	) -> CmsResult<String> {
		let key = self.upload_key(filename);
		self.store
			.create_media(&self.config.stage_bucket, &key, &data, content_type)
			.await?;
		info!(key, content_type, "uploaded media object");
		Ok(key)
	}

	/// Keys of every media object, for the image picker.
	pub async fn list(&self) -> CmsResult<Vec<String>> {
		Ok(self
			.store
			.list_media(&self.config.stage_bucket, &self.config.media_prefix)
			.await?)
	}

	/// Raw bytes of one media object.
	pub async fn read(&self, key: &str) -> CmsResult<Vec<u8>> {
		Ok(self.store.read_media(&self.config.stage_bucket, key).await?)
	}

	/// Remove a media object from the stage store.
	pub async fn delete(&self, key: &str) -> CmsResult<()> {
		self.store
			.delete_media(&self.config.stage_bucket, key)
			.await?;
		Ok(())
	}

	/// Browser-facing URL for a stored media key.
	pub fn display_url(&self, key: &str) -> String {
		clean_url(&self.config.media_proxy, key)
	}
}
