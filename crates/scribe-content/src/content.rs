//! Content item model and storage key derivation.
//!
//! Stored JSON uses the wire names downstream consumers already parse
//! (camelCase), so every struct here carries explicit serde renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::config::CmsConfig;

/// One entry in a content item's media manifest.
///
/// The manifest is deduplicated by storage `key`, never by display URL:
/// URLs carry proxy prefixes that differ run to run, keys do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
	/// Display name, inferred from the filename on first sight.
	pub name: String,
	/// Free-form description.
	#[serde(default)]
	pub description: String,
	/// Asset type (e.g. `image`).
	#[serde(rename = "type")]
	pub media_type: String,
	/// 1-based position in the manifest.
	pub order: u32,
	/// Free-form tags.
	#[serde(default)]
	pub tags: Vec<String>,
	/// Storage key of the asset; the manifest's identity.
	pub key: String,
}

/// Snapshot pointer recorded when an item is published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedData {
	/// Fresh identifier generated for this publish; never reused.
	pub id: String,
	/// Publish-store key of the snapshot.
	pub key: String,
	/// When the snapshot was written.
	pub published_date: DateTime<Utc>,
}

/// Preview location reported by downstream processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewInfo {
	/// Externally visible preview URI.
	pub catalog_entry_uri: String,
}

/// Release location reported by downstream processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
	/// Externally visible release URI.
	pub catalog_entry_uri: String,
	/// Source tag the downstream service stamped on the release.
	#[serde(default)]
	pub source: String,
}

/// The unit of editorial work.
///
/// Created in memory on first save; the stage store holds the working copy,
/// the publish store holds one immutable snapshot per publish. `content` is
/// an opaque serialized document tree owned by the editing surface; the
/// lifecycle never inspects it beyond round-tripping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
	/// Stable identifier, assigned once on first save.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Editorial title; must be non-empty before save.
	pub title: String,
	/// Author; must be non-empty before save.
	pub author: String,
	/// Refreshed on every save.
	pub date_saved: DateTime<Utc>,
	/// Opaque serialized document tree.
	pub content: JsonValue,
	/// Media manifest, deduplicated by storage key.
	#[serde(default)]
	pub media: Vec<MediaEntry>,
	/// Assigned catalog; required before publish.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub catalog_id: Option<String>,
	/// Title of the assigned catalog.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub catalog_title: Option<String>,
	/// Whether a publish snapshot exists.
	#[serde(default)]
	pub published: bool,
	/// Pointer to the most recent publish snapshot.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub published_data: Option<PublishedData>,
	/// Whether downstream processing confirmed the release.
	#[serde(default)]
	pub released: bool,
	/// Preview location, merged in from polled metadata.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub preview: Option<PreviewInfo>,
	/// Release location, merged in from polled metadata.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub release: Option<ReleaseInfo>,
}

impl ContentItem {
	/// New draft with empty content, not yet saved.
	pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
		Self {
			id: None,
			title: title.into(),
			author: author.into(),
			date_saved: Utc::now(),
			content: JsonValue::Null,
			media: Vec::new(),
			catalog_id: None,
			catalog_title: None,
			published: false,
			published_data: None,
			released: false,
			preview: None,
			release: None,
		}
	}
}

/// Stage-store key for a content id.
pub fn stage_key(config: &CmsConfig, id: &str) -> String {
	format!("{}{}", config.stage_prefix, id)
}

/// Publish-store key for a content id and publish id.
///
/// Embeds both identifiers so every publish lands at a new key and earlier
/// snapshots are never overwritten.
pub fn publish_key(config: &CmsConfig, id: &str, publish_id: &str) -> String {
	format!("{}{}/{}", config.ready_prefix, id, publish_id)
}
