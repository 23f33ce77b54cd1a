//! Typed event detail bodies.
//!
//! Field names follow the stored wire formats: content events use camelCase,
//! catalog events use snake_case, matching the records downstream consumers
//! already parse.

use serde::{Deserialize, Serialize};

/// Detail body of a release event.
///
/// Built from the item's polled metadata record; hands a published item off
/// to the downstream workflow for final site publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEventDetail {
	/// Storage key of the published source snapshot.
	pub post_key: String,
	/// Stage-side metadata record key for the item.
	pub metadata_key: String,
	/// Externally visible preview URL.
	pub preview_url: String,
	/// Content title.
	pub title: String,
	/// Catalog the item is assigned to.
	pub catalog_id: String,
	/// Source tag; filled in by the notifier from its configuration.
	#[serde(default)]
	pub source: String,
}

/// Detail body of a catalog publish event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPublishEventDetail {
	/// Catalog identifier.
	pub catalog_id: String,
	/// Catalog title.
	pub catalog_title: String,
	/// Storage key of the catalog's image asset, empty if none.
	pub catalog_image_key: String,
	/// Catalog description.
	pub catalog_description: String,
	/// Source tag; filled in by the notifier from its configuration.
	#[serde(default)]
	pub source: String,
}
