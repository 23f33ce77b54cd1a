//! Catalog registry: the named collections content items are published into.
//!
//! Catalog records live under their own prefix in the metadata store and keep
//! the original snake_case field names on the wire. Publishing a catalog is a
//! multi-step flow (update, record copy, optional image copy, event) and is
//! not transactional; the first failing step aborts and is surfaced as-is.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use scribe_events::{CatalogPublishEventDetail, EventNotifier};
use scribe_storages::{ObjectStore, StorageError};

use crate::config::CmsConfig;
use crate::{CmsError, CmsResult};

/// A catalog record as stored and published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
	/// Registry-assigned identifier; `None` until first create.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub catalog_id: Option<String>,
	/// Display title.
	pub catalog_title: String,
	/// Description shown alongside the catalog.
	#[serde(default)]
	pub catalog_description: String,
	/// Storage key of the catalog's cover image, empty when none is set.
	#[serde(default)]
	pub catalog_image_key: String,
	/// Goes false to true only through [`CatalogRegistry::publish`].
	#[serde(default)]
	pub published: bool,
	/// Assigned by the registry on create.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_at: Option<DateTime<Utc>>,
}

impl CatalogEntry {
	/// A fresh, unsaved entry.
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			catalog_id: None,
			catalog_title: title.into(),
			catalog_description: String::new(),
			catalog_image_key: String::new(),
			published: false,
			created_at: None,
		}
	}
}

/// CRUD and publish over catalog records.
pub struct CatalogRegistry {
	store: Arc<dyn ObjectStore>,
	notifier: EventNotifier,
	config: CmsConfig,
}

impl CatalogRegistry {
	/// Build a registry over a store and a notifier.
	pub fn new(store: Arc<dyn ObjectStore>, notifier: EventNotifier, config: CmsConfig) -> Self {
		Self {
			store,
			notifier,
			config,
		}
	}

	fn record_key(&self, id: &str) -> String {
		format!("{}{}", self.config.catalog_prefix, id)
	}

	/// Create a new catalog record.
	///
	/// Assigns an id and creation timestamp and forces `published = false`;
	/// whatever the caller set on those fields is overwritten.
	pub async fn create(&self, entry: &mut CatalogEntry) -> CmsResult<()> {
		let id = Uuid::new_v4().to_string();
		entry.catalog_id = Some(id.clone());
		entry.created_at = Some(Utc::now());
		entry.published = false;

		let key = self.record_key(&id);
		self.store
			.create(&self.config.stage_bucket, &key, &to_json(entry)?)
			.await?;
		info!(catalog_id = %id, "created catalog entry");
		Ok(())
	}

	/// Update an existing catalog record.
	///
	/// The record must already exist; updating is never an upsert.
	pub async fn update(&self, entry: &CatalogEntry) -> CmsResult<()> {
		let id = entry.catalog_id.as_deref().ok_or(CmsError::CatalogIdRequired)?;
		let key = self.record_key(id);
		match self.store.read(&self.config.stage_bucket, &key).await {
			Ok(_) => {}
			Err(StorageError::NotFound { .. }) => {
				return Err(CmsError::CatalogNotFound(id.to_string()));
			}
			Err(error) => return Err(error.into()),
		}
		self.store
			.update(&self.config.stage_bucket, &key, &to_json(entry)?)
			.await?;
		Ok(())
	}

	/// Fetch one catalog record by id.
	pub async fn get(&self, id: &str) -> CmsResult<CatalogEntry> {
		let key = self.record_key(id);
		let value = match self.store.read(&self.config.stage_bucket, &key).await {
			Ok(value) => value,
			Err(StorageError::NotFound { .. }) => {
				return Err(CmsError::CatalogNotFound(id.to_string()));
			}
			Err(error) => return Err(error.into()),
		};
		serde_json::from_value(value).map_err(|e| CmsError::InvalidRecord(e.to_string()))
	}

	/// List every catalog record.
	///
	/// Scans the catalog prefix, skipping keys under the image prefix (cover
	/// images share the namespace). A record that fails to parse is skipped
	/// with a warning rather than poisoning the whole listing.
	pub async fn list(&self) -> CmsResult<Vec<CatalogEntry>> {
		let keys = self
			.store
			.list_media(&self.config.stage_bucket, &self.config.catalog_prefix)
			.await?;

		let mut entries = Vec::new();
		for key in keys {
			if key.starts_with(&self.config.catalog_image_prefix) {
				continue;
			}
			let value = self.store.read(&self.config.stage_bucket, &key).await?;
			match serde_json::from_value::<CatalogEntry>(value) {
				Ok(entry) => entries.push(entry),
				Err(error) => {
					warn!(key, %error, "skipping unparsable catalog record");
				}
			}
		}
		Ok(entries)
	}

	/// Upload a catalog cover image and return its storage key.
	pub async fn upload_image(
		&self,
		filename: &str,
		data: Vec<u8>,
		content_type: &str,
	) -> CmsResult<String> {
		let key = format!("{}{}", self.config.catalog_image_prefix, filename);
		self.store
			.create_media(&self.config.stage_bucket, &key, &data, content_type)
			.await?;
		Ok(key)
	}

	/// Publish a catalog: flip the flag, copy record and image to the publish
	/// store, then notify downstream.
	///
	/// Steps run in order and the first failure aborts; completed steps stay
	/// in place. The record is copied under its stage key, so the published
	/// copy is addressable by the same key.
	pub async fn publish(&self, id: &str) -> CmsResult<CatalogEntry> {
		let mut entry = self.get(id).await?;
		entry.published = true;

		let key = self.record_key(id);
		self.store
			.update(&self.config.stage_bucket, &key, &to_json(&entry)?)
			.await?;
		self.store
			.copy_object(
				&self.config.stage_bucket,
				&key,
				&self.config.publish_bucket,
				&key,
			)
			.await?;
		if !entry.catalog_image_key.is_empty() {
			self.store
				.copy_object(
					&self.config.stage_bucket,
					&entry.catalog_image_key,
					&self.config.publish_bucket,
					&entry.catalog_image_key,
				)
				.await?;
		}

		self.notifier
			.send_catalog_publish_event(CatalogPublishEventDetail {
				catalog_id: id.to_string(),
				catalog_title: entry.catalog_title.clone(),
				catalog_image_key: entry.catalog_image_key.clone(),
				catalog_description: entry.catalog_description.clone(),
				source: String::new(),
			})
			.await?;
		info!(catalog_id = %id, "published catalog");
		Ok(entry)
	}
}

fn to_json(entry: &CatalogEntry) -> CmsResult<serde_json::Value> {
	serde_json::to_value(entry).map_err(|e| CmsError::InvalidRecord(e.to_string()))
}
