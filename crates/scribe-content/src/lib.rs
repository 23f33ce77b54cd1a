//! # Scribe content core
//!
//! Content lifecycle orchestration for a serverless CMS.
//!
//! The editing surface (an external rich-text framework) produces opaque
//! document trees and rendered HTML; this crate owns everything that happens
//! after that: the Draft → Published → Released state machine, the object
//! storage writes and cross-bucket media copies each transition requires,
//! asynchronous metadata polling with a staleness guard, and the event-bus
//! notifications that hand content off to downstream workflow services.
//!
//! ## Architecture
//!
//! ```text
//! scribe-content
//! ├── content   - ContentItem model, media manifest, storage keys
//! ├── document  - boundary to the external editing surface
//! ├── lifecycle - Draft/Published/Released orchestrator
//! ├── metadata  - side-channel metadata records + bounded polling
//! ├── catalog   - catalog entry CRUD + publish workflow
//! ├── media     - editor asset upload/listing
//! ├── service   - explicitly lifetime-scoped service container
//! └── config    - bucket/prefix/event-bus configuration
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scribe_content::prelude::*;
//! use scribe_storages::MemoryStore;
//! use scribe_events::MemoryBus;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CmsConfig::new("stage-bucket", "publish-bucket", "metadata-bucket");
//! let lifecycle = Lifecycle::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MemoryBus::new()),
//!     config,
//! );
//!
//! let mut item = ContentItem::new("Hello", "jane");
//! let snapshot = DocumentSnapshot::new(json!({"root": []}), "<p>Hello</p>");
//! lifecycle.save(&mut item, &snapshot).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod lifecycle;
pub mod media;
pub mod metadata;
pub mod service;

// Prelude for convenient imports
pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use crate::catalog::{CatalogEntry, CatalogRegistry};
	pub use crate::config::CmsConfig;
	pub use crate::content::{ContentItem, MediaEntry, PublishedData};
	pub use crate::document::{DocumentAdapter, DocumentSnapshot, EditorSurface};
	pub use crate::error::{CmsError, CmsResult};
	pub use crate::lifecycle::{Lifecycle, PublishOutcome, ReleaseOutcome};
	pub use crate::media::MediaLibrary;
	pub use crate::metadata::{MetaDataRecord, MetadataPoller, MetadataStore};
	pub use crate::service::{CmsService, DataService};
}

pub use config::CmsConfig;
pub use error::{CmsError, CmsResult};
