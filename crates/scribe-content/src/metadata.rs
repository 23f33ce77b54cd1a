//! Side-channel metadata records and bounded polling.
//!
//! Downstream processing (preview generation, release, AI asset generation)
//! reports its outcome through metadata records this system only ever reads.
//! A record is trusted only while it is fresh: older than the staleness
//! window means a previous run's leftovers, not the outcome we are waiting
//! for.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

use scribe_storages::ObjectStore;

use crate::config::CmsConfig;
use crate::content::{PreviewInfo, ReleaseInfo};
use crate::{CmsError, CmsResult};

/// Freshness threshold for polled metadata records.
pub const STALENESS_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Details of an AI-generated image reported through metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiImageDetails {
	/// Key of the generated image in the publish store.
	pub orig_src: String,
	/// Published location of the image.
	#[serde(default)]
	pub pub_src: String,
	/// Display title for the asset.
	#[serde(default)]
	pub title: String,
	/// Description for the asset.
	#[serde(default)]
	pub description: String,
	/// Asset type (e.g. `image`).
	#[serde(rename = "type", default)]
	pub media_type: String,
}

/// Reference to the source snapshot a metadata record describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
	/// Storage key of the source snapshot.
	pub key: String,
}

/// Externally produced metadata record; read-only from this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDataRecord {
	/// Stage key of the content item this record describes.
	#[serde(default)]
	pub post_key: String,
	/// Source location the downstream service processed.
	#[serde(default)]
	pub src: String,
	/// Publish snapshot data echoed back by the pipeline.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub published_data: Option<JsonValue>,
	/// Whether downstream processing considers the item published.
	#[serde(default)]
	pub published: bool,
	/// When the record was produced; drives the staleness check.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub published_date: Option<DateTime<Utc>>,
	/// Source snapshot reference.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<SourceRef>,
	/// Preview location.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub preview: Option<PreviewInfo>,
	/// Whether downstream processing confirmed the release.
	#[serde(default)]
	pub released: bool,
	/// Release location.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub release: Option<ReleaseInfo>,
	/// Whether the pipeline generated an image for this item.
	#[serde(default)]
	pub ai_image_generated: bool,
	/// Details of the generated image, when present.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ai_image_details: Option<AiImageDetails>,
}

/// Keyed reads of metadata records.
#[derive(Clone)]
pub struct MetadataStore {
	store: Arc<dyn ObjectStore>,
	bucket: String,
	prefix: String,
}

impl MetadataStore {
	/// Store reading from the configured metadata bucket/prefix.
	pub fn new(store: Arc<dyn ObjectStore>, config: &CmsConfig) -> Self {
		Self {
			store,
			bucket: config.metadata_bucket.clone(),
			prefix: config.metadata_prefix.clone(),
		}
	}

	/// Metadata key for a content id.
	pub fn key_for(&self, id: &str) -> String {
		format!("{}{}", self.prefix, id)
	}

	/// Single-shot read of the metadata record for `id`.
	///
	/// Returns the record together with the underlying object's last-modified
	/// timestamp (the staleness fallback when the record carries no
	/// `publishedDate`).
	pub async fn get(&self, id: &str) -> CmsResult<(MetaDataRecord, DateTime<Utc>)> {
		let key = self.key_for(id);
		let value = self.store.read(&self.bucket, &key).await?;
		let modified = self.store.last_modified(&self.bucket, &key).await?;
		let record: MetaDataRecord =
			serde_json::from_value(value).map_err(|e| CmsError::InvalidRecord(e.to_string()))?;
		Ok((record, modified))
	}
}

/// Bounded, strictly sequential polling for metadata records.
///
/// One poll loop blocks the workflow step that started it (publish or
/// release); callers keep a per-item in-flight guard so two loops never run
/// for the same id.
#[derive(Clone)]
pub struct MetadataPoller {
	store: MetadataStore,
	max_retries: u32,
	delay: Duration,
}

impl MetadataPoller {
	/// Poller over a metadata store with the configured retry budget.
	pub fn new(store: MetadataStore, config: &CmsConfig) -> Self {
		Self {
			store,
			max_retries: config.poll_max_retries,
			delay: config.poll_delay,
		}
	}

	/// Poll until a fresh record for `id` appears or the budget runs out.
	///
	/// Each attempt is a single-shot read. A read failure counts as a failed
	/// attempt; so does a record older than [`STALENESS_WINDOW`] (judged by
	/// its own `publishedDate`, else the object's last-modified timestamp).
	/// Attempts are separated by a fixed delay and never overlap.
	///
	/// # Errors
	///
	/// Returns `` `CmsError::PollExhausted` `` when the budget is spent,
	/// distinguishable from a single-attempt transport error.
	pub async fn poll(&self, id: &str) -> CmsResult<MetaDataRecord> {
		let mut stale_seen = false;

		for attempt in 1..=self.max_retries {
			match self.store.get(id).await {
				Ok((record, modified)) => {
					let reference = record.published_date.unwrap_or(modified);
					let age = Utc::now().signed_duration_since(reference);
					if age.to_std().map(|age| age <= STALENESS_WINDOW).unwrap_or(true) {
						debug!(id, attempt, "metadata record is current");
						return Ok(record);
					}
					// Out of window: a leftover from an earlier run
					stale_seen = true;
					debug!(id, attempt, age_secs = age.num_seconds(), "metadata record is stale");
				}
				Err(error) => {
					debug!(id, attempt, %error, "metadata read failed");
				}
			}
			if attempt < self.max_retries {
				tokio::time::sleep(self.delay).await;
			}
		}

		warn!(id, attempts = self.max_retries, stale_seen, "metadata poll exhausted");
		Err(CmsError::PollExhausted {
			id: id.to_string(),
			attempts: self.max_retries,
			stale_seen,
		})
	}
}
