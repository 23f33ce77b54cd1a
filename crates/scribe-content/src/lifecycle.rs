//! Content lifecycle orchestrator: the Draft → Published → Released state
//! machine for a single content item.
//!
//! ```text
//! Draft --save--> Draft (idempotent, same id)
//! Draft --publish--> Published         [requires catalog assignment]
//! Published --release--> Released      [requires published == true]
//! Published/Released --load--> (any)   [reconciles AI-asset metadata]
//! ```
//!
//! The orchestrator decides what storage writes, media copies and events each
//! transition requires. Multi-step writes are not transactional: partial
//! completion is surfaced to the caller, never silently swallowed. The stage
//! copy of an item is mutated by save, publish, release and load alike, each
//! as a full read-modify-write with no version token; concurrent sessions
//! last-write-win.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};
use uuid::Uuid;

use scribe_events::{EventBus, EventNotifier, ReleaseEventDetail};
use scribe_storages::ObjectStore;

use crate::config::CmsConfig;
use crate::content::{ContentItem, MediaEntry, PublishedData, ReleaseInfo, publish_key, stage_key};
use crate::document::{DocumentAdapter, DocumentSnapshot, clean_url};
use crate::metadata::{MetaDataRecord, MetadataPoller, MetadataStore};
use crate::{CmsError, CmsResult};

/// Result of a publish call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
	/// Snapshot written, media copied, metadata merged back.
	Published,
	/// Snapshot written and media copied, but metadata did not arrive within
	/// the poll budget. The publish itself succeeded; preview/release fields
	/// remain pending.
	MetadataPending,
}

/// Result of a release call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
	/// Release event sent and downstream completion confirmed.
	Released,
	/// Release event sent, but completion could not be confirmed within the
	/// poll budget. The item stays unreleased and needs a manual re-check;
	/// the event is not re-sent.
	MetadataPending,
}

/// Owns the lifecycle state machine for content items.
pub struct Lifecycle {
	store: Arc<dyn ObjectStore>,
	notifier: EventNotifier,
	adapter: DocumentAdapter,
	metadata: MetadataStore,
	poller: MetadataPoller,
	config: CmsConfig,
	// ids with a metadata poll in flight; prevents re-entrant polls, not
	// cancellation of running ones
	polling: Mutex<HashSet<String>>,
}

impl Lifecycle {
	/// Build an orchestrator over a store and an event bus.
	pub fn new(store: Arc<dyn ObjectStore>, bus: Arc<dyn EventBus>, config: CmsConfig) -> Self {
		let notifier_config = config.notifier_config();
		let metadata = MetadataStore::new(store.clone(), &config);
		Self {
			notifier: EventNotifier::new(bus, notifier_config),
			adapter: DocumentAdapter::new(config.media_proxy.clone()),
			poller: MetadataPoller::new(metadata.clone(), &config),
			metadata,
			store,
			config,
			polling: Mutex::new(HashSet::new()),
		}
	}

	/// The document adapter this orchestrator uses at the editor boundary.
	pub fn adapter(&self) -> &DocumentAdapter {
		&self.adapter
	}

	/// Save the current document to the stage store.
	///
	/// Assigns an id on first save; later saves overwrite the same stage key.
	/// The media manifest is re-derived from the generated HTML and merged
	/// with the entries already known, deduplicated by storage key.
	///
	/// # Errors
	///
	/// Returns `` `CmsError::Validation` `` before any I/O if title or author
	/// is empty or the snapshot carries no content.
	pub async fn save(
		&self,
		item: &mut ContentItem,
		snapshot: &DocumentSnapshot,
	) -> CmsResult<()> {
		if item.title.trim().is_empty() {
			return Err(CmsError::Validation("title is required".to_string()));
		}
		if item.author.trim().is_empty() {
			return Err(CmsError::Validation("author is required".to_string()));
		}
		self.adapter.validate(snapshot)?;

		self.refresh_from_snapshot(item, snapshot);
		item.date_saved = Utc::now();
		if item.id.is_none() {
			item.id = Some(Uuid::new_v4().to_string());
		}

		let id = item.id.as_deref().unwrap_or_default();
		let key = stage_key(&self.config, id);
		self.store
			.update(&self.config.stage_bucket, &key, &to_json(item)?)
			.await?;
		info!(id, key, media = item.media.len(), "saved content item");
		Ok(())
	}

	/// Publish the item: write an immutable snapshot and copy its media.
	///
	/// Every call generates a fresh publish id, so republishing an edited
	/// item leaves earlier snapshots untouched. Media copies fan out
	/// concurrently; a failed copy fails the publish but completed copies
	/// are not undone. After the snapshot is durable the orchestrator polls
	/// for the externally assigned preview metadata; a poll that comes up
	/// empty downgrades the result to [`PublishOutcome::MetadataPending`]
	/// rather than failing the publish.
	pub async fn publish(
		&self,
		item: &mut ContentItem,
		snapshot: &DocumentSnapshot,
	) -> CmsResult<PublishOutcome> {
		let id = item.id.clone().ok_or(CmsError::NotSaved)?;
		if item.catalog_id.is_none() {
			return Err(CmsError::CatalogRequired);
		}

		self.refresh_from_snapshot(item, snapshot);

		let publish_id = Uuid::new_v4().to_string();
		let key = publish_key(&self.config, &id, &publish_id);
		let published_data = PublishedData {
			id: publish_id,
			key: key.clone(),
			published_date: Utc::now(),
		};

		let mut snapshot_item = item.clone();
		snapshot_item.published = true;
		snapshot_item.published_data = Some(published_data.clone());
		self.store
			.create(&self.config.publish_bucket, &key, &to_json(&snapshot_item)?)
			.await?;
		self.store
			.create_html(
				&self.config.publish_bucket,
				&format!("{}.html", key),
				&snapshot.html,
			)
			.await?;

		self.copy_media_to_publish(&item.media).await?;

		item.published = true;
		item.published_data = Some(published_data);
		let stage = stage_key(&self.config, &id);
		self.store
			.update(&self.config.stage_bucket, &stage, &to_json(item)?)
			.await?;
		info!(id, key, "published content item");

		let _guard = self.begin_poll(&id)?;
		match self.poller.poll(&id).await {
			Ok(record) => {
				merge_metadata(item, &record);
				self.store
					.update(&self.config.stage_bucket, &stage, &to_json(item)?)
					.await?;
				Ok(PublishOutcome::Published)
			}
			Err(error) => {
				warn!(id, %error, "publish succeeded but metadata is pending");
				Ok(PublishOutcome::MetadataPending)
			}
		}
	}

	/// Release the item to the downstream workflow.
	///
	/// The release event body is built from the item's current metadata
	/// record, so that read must succeed; unlike publish, release has no
	/// "succeeded without metadata" entry path. After the event is sent the
	/// orchestrator polls for confirmation; exhaustion leaves the item
	/// unreleased and reports [`ReleaseOutcome::MetadataPending`] (the event
	/// was sent and is not retried).
	pub async fn release(&self, item: &mut ContentItem) -> CmsResult<ReleaseOutcome> {
		let id = item.id.clone().ok_or(CmsError::NotSaved)?;
		if !item.published {
			return Err(CmsError::NotPublished);
		}
		let catalog_id = item.catalog_id.clone().ok_or(CmsError::CatalogRequired)?;

		let (record, _) = self.metadata.get(&id).await?;

		let detail = ReleaseEventDetail {
			post_key: record
				.source
				.as_ref()
				.map(|source| source.key.clone())
				.unwrap_or_else(|| record.src.clone()),
			metadata_key: self.metadata.key_for(&id),
			preview_url: record
				.preview
				.as_ref()
				.map(|preview| preview.catalog_entry_uri.clone())
				.unwrap_or_else(|| clean_url(&self.config.preview_url, &id)),
			title: item.title.clone(),
			catalog_id,
			source: String::new(),
		};
		self.notifier.send_release_event(detail).await?;

		let _guard = self.begin_poll(&id)?;
		match self.poller.poll(&id).await {
			Ok(record) => {
				merge_metadata(item, &record);
				if item.release.is_none() {
					// Downstream confirmed without reporting a location
					item.release = Some(ReleaseInfo {
						catalog_entry_uri: clean_url(&self.config.release_url, &id),
						source: String::new(),
					});
				}
				item.released = true;
				let stage = stage_key(&self.config, &id);
				self.store
					.update(&self.config.stage_bucket, &stage, &to_json(item)?)
					.await?;
				info!(id, "release confirmed");
				Ok(ReleaseOutcome::Released)
			}
			Err(error) => {
				warn!(id, %error, "release event sent but confirmation is pending");
				Ok(ReleaseOutcome::MetadataPending)
			}
		}
	}

	/// Load an item from the stage store, reconciling AI-generated assets.
	///
	/// If the item's metadata reports an AI-generated image whose key is not
	/// yet in the media manifest, the image is copied from the publish store
	/// into the stage store and appended to the manifest before the item is
	/// handed to the editor, so assets generated outside this core stay
	/// visible and editable locally.
	pub async fn load(&self, id: &str) -> CmsResult<ContentItem> {
		let key = stage_key(&self.config, id);
		let value = self.store.read(&self.config.stage_bucket, &key).await?;
		let mut item: ContentItem =
			serde_json::from_value(value).map_err(|e| CmsError::InvalidRecord(e.to_string()))?;

		if !item.published {
			return Ok(item);
		}

		let record = match self.metadata.get(id).await {
			Ok((record, _)) => record,
			Err(error) => {
				// Metadata absence never blocks editing
				debug!(id, %error, "no metadata available on load");
				return Ok(item);
			}
		};

		if let Some(details) = record.ai_image_details.as_ref().filter(|_| record.ai_image_generated) {
			let already_known = item.media.iter().any(|entry| entry.key == details.orig_src);
			if !already_known {
				self.store
					.copy_object(
						&self.config.publish_bucket,
						&details.orig_src,
						&self.config.stage_bucket,
						&details.orig_src,
					)
					.await?;
				let order = item.media.len() as u32 + 1;
				item.media.push(MediaEntry {
					name: if details.title.is_empty() {
						crate::document::infer_name(&details.orig_src)
					} else {
						details.title.clone()
					},
					description: details.description.clone(),
					media_type: if details.media_type.is_empty() {
						"image".to_string()
					} else {
						details.media_type.clone()
					},
					order,
					tags: Vec::new(),
					key: details.orig_src.clone(),
				});
				self.store
					.update(&self.config.stage_bucket, &key, &to_json(&item)?)
					.await?;
				info!(id, key = %details.orig_src, "reconciled AI-generated image into manifest");
			}
		}

		Ok(item)
	}

	/// Whether a metadata poll for `id` is currently in flight.
	pub fn is_polling(&self, id: &str) -> bool {
		self.polling.lock().contains(id)
	}

	fn refresh_from_snapshot(&self, item: &mut ContentItem, snapshot: &DocumentSnapshot) {
		let keys = self.adapter.image_keys(&snapshot.html);
		item.media = self.adapter.merge_media(&item.media, &keys);
		item.content = snapshot.nodes.clone();
	}

	/// Fan out stage→publish copies for every manifest entry.
	///
	/// Copies are independent; all are awaited before the outcome is judged,
	/// and the failure lists exactly the keys that were rejected.
	async fn copy_media_to_publish(&self, media: &[MediaEntry]) -> CmsResult<()> {
		let copies = media.iter().map(|entry| {
			let store = self.store.clone();
			let src_bucket = self.config.stage_bucket.clone();
			let dst_bucket = self.config.publish_bucket.clone();
			let key = entry.key.clone();
			async move {
				let result = store
					.copy_object(&src_bucket, &key, &dst_bucket, &key)
					.await;
				(key, result)
			}
		});

		let results = join_all(copies).await;
		let total = results.len();
		let failed_keys: Vec<String> = results
			.into_iter()
			.filter_map(|(key, result)| result.err().map(|error| {
				warn!(key, %error, "media copy failed during publish");
				key
			}))
			.collect();

		if failed_keys.is_empty() {
			Ok(())
		} else {
			Err(CmsError::MediaCopy { total, failed_keys })
		}
	}

	fn begin_poll(&self, id: &str) -> CmsResult<PollGuard<'_>> {
		let mut polling = self.polling.lock();
		if !polling.insert(id.to_string()) {
			return Err(CmsError::PollInProgress(id.to_string()));
		}
		Ok(PollGuard {
			polling: &self.polling,
			id: id.to_string(),
		})
	}
}

/// Clears the in-flight marker when a poll scope ends.
struct PollGuard<'a> {
	polling: &'a Mutex<HashSet<String>>,
	id: String,
}

impl Drop for PollGuard<'_> {
	fn drop(&mut self) {
		self.polling.lock().remove(&self.id);
	}
}

/// Merge externally discovered state into the local item.
fn merge_metadata(item: &mut ContentItem, record: &MetaDataRecord) {
	if let Some(preview) = record.preview.clone() {
		item.preview = Some(preview);
	}
	if let Some(release) = record.release.clone() {
		item.release = Some(release);
	}
	item.released = item.released || record.released;
}

fn to_json(item: &ContentItem) -> CmsResult<JsonValue> {
	serde_json::to_value(item).map_err(|e| CmsError::InvalidRecord(e.to_string()))
}
