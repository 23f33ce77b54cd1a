//! CMS configuration: buckets, prefixes, event bus, URL templates.
//!
//! Loaded once at startup. The stage bucket holds working drafts and editor
//! media, the publish bucket holds immutable publish-ready snapshots, and the
//! metadata bucket holds the externally produced side-channel records.

use std::env;
use std::time::Duration;

use crate::{CmsError, CmsResult};

/// Default number of metadata poll attempts.
pub const DEFAULT_POLL_RETRIES: u32 = 12;

/// Default delay between metadata poll attempts.
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(5);

/// Bucket, prefix and event-bus configuration for the CMS core.
#[derive(Debug, Clone)]
pub struct CmsConfig {
	/// Working/draft bucket.
	pub stage_bucket: String,
	/// Key prefix for content records in the stage bucket.
	pub stage_prefix: String,
	/// Bucket holding immutable publish snapshots.
	pub publish_bucket: String,
	/// Key prefix for publish snapshots.
	pub ready_prefix: String,
	/// Bucket holding externally produced metadata records.
	pub metadata_bucket: String,
	/// Key prefix for metadata records.
	pub metadata_prefix: String,
	/// Key prefix for editor media assets.
	pub media_prefix: String,
	/// Host serving media assets to the editor (display URLs only).
	pub media_proxy: String,
	/// Key prefix for catalog entries.
	pub catalog_prefix: String,
	/// Key prefix for catalog image assets.
	pub catalog_image_prefix: String,
	/// Name of the outbound event bus.
	pub event_bus_name: String,
	/// Source tag for release events.
	pub release_event_source: String,
	/// Source tag for catalog publish events.
	pub catalog_event_source: String,
	/// Detail type for release events.
	pub release_detail_type: String,
	/// Externally visible preview URL host.
	pub preview_url: String,
	/// Externally visible release URL host.
	pub release_url: String,
	/// Metadata poll retry budget.
	pub poll_max_retries: u32,
	/// Fixed delay between metadata poll attempts.
	pub poll_delay: Duration,
}

impl CmsConfig {
	/// Configuration with conventional prefixes and the given buckets.
	pub fn new(
		stage_bucket: impl Into<String>,
		publish_bucket: impl Into<String>,
		metadata_bucket: impl Into<String>,
	) -> Self {
		Self {
			stage_bucket: stage_bucket.into(),
			stage_prefix: "posts/".to_string(),
			publish_bucket: publish_bucket.into(),
			ready_prefix: "ready-to-publish/".to_string(),
			metadata_bucket: metadata_bucket.into(),
			metadata_prefix: "data/".to_string(),
			media_prefix: "media/".to_string(),
			media_proxy: String::new(),
			catalog_prefix: "data/catalog/".to_string(),
			catalog_image_prefix: "data/catalog/images/".to_string(),
			event_bus_name: String::new(),
			release_event_source: "content.published".to_string(),
			catalog_event_source: "catalog.published".to_string(),
			release_detail_type: "content-changes".to_string(),
			preview_url: String::new(),
			release_url: String::new(),
			poll_max_retries: DEFAULT_POLL_RETRIES,
			poll_delay: DEFAULT_POLL_DELAY,
		}
	}

	/// Load configuration from environment variables.
	///
	/// # Environment Variables
	///
	/// Required:
	/// - `STAGE_BUCKET`, `PUBLISH_BUCKET`, `METADATA_BUCKET`
	///
	/// Optional (conventional defaults in parentheses):
	/// - `STAGE_PREFIX` (`posts/`), `READY_FOR_PUBLISH_PREFIX` (`ready-to-publish/`)
	/// - `METADATA_PREFIX` (`data/`)
	/// - `MEDIA_PREFIX` (`media/`), `MEDIA_PROXY`
	/// - `CATALOG_PREFIX` (`data/catalog/`), `CATALOG_IMAGE_PREFIX` (`data/catalog/images/`)
	/// - `RELEASE_EVENT_BUS_NAME`, `RELEASE_EVENT_SOURCE` (`content.published`),
	///   `CATALOG_EVENT_SOURCE` (`catalog.published`), `RELEASE_TYPE` (`content-changes`)
	/// - `PREVIEW_URL`, `RELEASE_URL`
	pub fn from_env() -> CmsResult<Self> {
		let required = |name: &str| -> CmsResult<String> {
			env::var(name)
				.map_err(|_| CmsError::Config(format!("{} environment variable not set", name)))
		};
		let optional = |name: &str, default: &str| -> String {
			env::var(name).unwrap_or_else(|_| default.to_string())
		};

		Ok(Self {
			stage_bucket: required("STAGE_BUCKET")?,
			stage_prefix: optional("STAGE_PREFIX", "posts/"),
			publish_bucket: required("PUBLISH_BUCKET")?,
			ready_prefix: optional("READY_FOR_PUBLISH_PREFIX", "ready-to-publish/"),
			metadata_bucket: required("METADATA_BUCKET")?,
			metadata_prefix: optional("METADATA_PREFIX", "data/"),
			media_prefix: optional("MEDIA_PREFIX", "media/"),
			media_proxy: optional("MEDIA_PROXY", ""),
			catalog_prefix: optional("CATALOG_PREFIX", "data/catalog/"),
			catalog_image_prefix: optional("CATALOG_IMAGE_PREFIX", "data/catalog/images/"),
			event_bus_name: optional("RELEASE_EVENT_BUS_NAME", ""),
			release_event_source: optional("RELEASE_EVENT_SOURCE", "content.published"),
			catalog_event_source: optional("CATALOG_EVENT_SOURCE", "catalog.published"),
			release_detail_type: optional("RELEASE_TYPE", "content-changes"),
			preview_url: optional("PREVIEW_URL", ""),
			release_url: optional("RELEASE_URL", ""),
			poll_max_retries: DEFAULT_POLL_RETRIES,
			poll_delay: DEFAULT_POLL_DELAY,
		})
	}

	/// Event-bus settings derived from this configuration.
	pub fn notifier_config(&self) -> scribe_events::NotifierConfig {
		scribe_events::NotifierConfig {
			bus_name: self.event_bus_name.clone(),
			release_source: self.release_event_source.clone(),
			catalog_source: self.catalog_event_source.clone(),
			release_detail_type: self.release_detail_type.clone(),
			catalog_detail_type: "catalog-changes".to_string(),
		}
	}
}
