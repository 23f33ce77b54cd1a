//! # scribe-events
//!
//! Outbound event notifications for the Scribe CMS.
//!
//! The release pipeline is event-driven: when content is released or a
//! catalog is published, this crate puts a structured entry on a named event
//! bus and unspecified downstream workflow services take it from there.
//! Sends are fire-and-forget: success or failure of the send itself is the
//! only acknowledgment, and no retry policy lives at this layer.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scribe_events::{EventNotifier, NotifierConfig, ReleaseEventDetail};
//! # use scribe_events::MemoryBus;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = Arc::new(MemoryBus::new());
//!     let notifier = EventNotifier::new(bus, NotifierConfig::new("cms-bus"));
//!
//!     notifier
//!         .send_release_event(ReleaseEventDetail {
//!             post_key: "posts/p1".into(),
//!             metadata_key: "data/p1".into(),
//!             preview_url: "https://preview.example.com/p1".into(),
//!             title: "Hello".into(),
//!             catalog_id: "cat-9".into(),
//!             source: String::new(),
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod backends;
pub mod bus;
pub mod detail;
pub mod error;
pub mod notifier;

pub use bus::{EventBus, EventEntry};
pub use detail::{CatalogPublishEventDetail, ReleaseEventDetail};
pub use error::{EventError, Result};
pub use notifier::{EventNotifier, NotifierConfig};

#[cfg(feature = "memory")]
pub use backends::memory::MemoryBus;
