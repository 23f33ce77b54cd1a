//! # Scribe
//!
//! Content lifecycle orchestration for a serverless CMS.
//!
//! Scribe owns everything that happens after a rich-text editor produces a
//! document: the Draft → Published → Released state machine, the object
//! storage writes and cross-bucket media copies each transition requires,
//! bounded metadata polling with a staleness guard, and the event-bus
//! notifications that hand content off to downstream workflow services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - everything, including the cloud backends
//! - `core` - lifecycle, storage and event abstractions with the in-memory
//!   backends only
//! - `storages` / `events` / `content` - individual subsystems
//! - `s3` - S3 object storage backend
//! - `eventbridge` - EventBridge event bus backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scribe::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CmsConfig::new("stage-bucket", "publish-bucket", "metadata-bucket");
//! let service = DataService::new(config);
//! service.init(
//!     Arc::new(scribe::storages::MemoryStore::new()),
//!     Arc::new(scribe::events::MemoryBus::new()),
//! );
//!
//! let mut item = ContentItem::new("Hello", "jane");
//! let snapshot = DocumentSnapshot::new(json!({"root": []}), "<p>Hello</p>");
//! service.service()?.lifecycle().save(&mut item, &snapshot).await?;
//! # Ok(())
//! # }
//! ```

// Subsystem re-exports under their own namespaces
#[cfg(feature = "storages")]
pub use scribe_storages as storages;

#[cfg(feature = "events")]
pub use scribe_events as events;

#[cfg(feature = "content")]
pub use scribe_content as content;

// Re-export the storage gateway
#[cfg(feature = "storages")]
pub use scribe_storages::{ObjectStore, StorageConfig, StorageError, create_store};

// Re-export the event layer
#[cfg(feature = "events")]
pub use scribe_events::{
	CatalogPublishEventDetail, EventBus, EventEntry, EventError, EventNotifier, NotifierConfig,
	ReleaseEventDetail,
};

// Re-export the content core
#[cfg(feature = "content")]
pub use scribe_content::{
	CmsConfig, CmsError, CmsResult,
	catalog::{CatalogEntry, CatalogRegistry},
	content::{ContentItem, MediaEntry, PublishedData},
	document::{DocumentAdapter, DocumentSnapshot, EditorSurface, clean_url},
	lifecycle::{Lifecycle, PublishOutcome, ReleaseOutcome},
	media::MediaLibrary,
	metadata::{MetaDataRecord, MetadataPoller, MetadataStore},
	service::{CmsService, DataService},
};

/// Convenient imports for application code.
#[cfg(feature = "content")]
pub mod prelude {
	pub use scribe_content::prelude::*;
	#[cfg(feature = "events")]
	pub use scribe_events::{EventBus, EventNotifier};
	#[cfg(feature = "storages")]
	pub use scribe_storages::{ObjectStore, StorageConfig, create_store};
}
