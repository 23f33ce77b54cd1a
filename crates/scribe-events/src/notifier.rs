//! Event notifier: typed send operations over the bus transport.

use std::sync::Arc;

use tracing::info;

use crate::bus::{EventBus, EventEntry};
use crate::detail::{CatalogPublishEventDetail, ReleaseEventDetail};
use crate::{EventError, Result};

/// Bus name, source tags and detail types for outbound events.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
	/// Name of the destination event bus.
	pub bus_name: String,
	/// Source tag for release events.
	pub release_source: String,
	/// Source tag for catalog publish events.
	pub catalog_source: String,
	/// Detail type for release events.
	pub release_detail_type: String,
	/// Detail type for catalog publish events.
	pub catalog_detail_type: String,
}

impl NotifierConfig {
	/// Configuration with the conventional source tags and detail types.
	pub fn new(bus_name: impl Into<String>) -> Self {
		Self {
			bus_name: bus_name.into(),
			release_source: "content.published".to_string(),
			catalog_source: "catalog.published".to_string(),
			release_detail_type: "content-changes".to_string(),
			catalog_detail_type: "catalog-changes".to_string(),
		}
	}
}

/// Sends release and catalog-publish events.
///
/// Pure translation and transport: no local state, no retry policy. Retry,
/// if any, is the caller's responsibility, and currently no caller retries
/// a failed send.
#[derive(Clone)]
pub struct EventNotifier {
	bus: Arc<dyn EventBus>,
	config: NotifierConfig,
}

impl EventNotifier {
	/// Create a notifier over a bus transport.
	pub fn new(bus: Arc<dyn EventBus>, config: NotifierConfig) -> Self {
		Self { bus, config }
	}

	/// Send a release event for a published content item.
	pub async fn send_release_event(&self, mut detail: ReleaseEventDetail) -> Result<()> {
		detail.source = self.config.release_source.clone();
		let body = serde_json::to_value(&detail)
			.map_err(|e| EventError::Serialize(e.to_string()))?;
		info!(post_key = %detail.post_key, bus = %self.config.bus_name, "sending release event");
		self.bus
			.put_event(EventEntry {
				bus_name: self.config.bus_name.clone(),
				source: self.config.release_source.clone(),
				detail_type: self.config.release_detail_type.clone(),
				detail: body,
			})
			.await
	}

	/// Send a catalog publish event.
	pub async fn send_catalog_publish_event(
		&self,
		mut detail: CatalogPublishEventDetail,
	) -> Result<()> {
		detail.source = self.config.catalog_source.clone();
		let body = serde_json::to_value(&detail)
			.map_err(|e| EventError::Serialize(e.to_string()))?;
		info!(catalog_id = %detail.catalog_id, bus = %self.config.bus_name, "sending catalog publish event");
		self.bus
			.put_event(EventEntry {
				bus_name: self.config.bus_name.clone(),
				source: self.config.catalog_source.clone(),
				detail_type: self.config.catalog_detail_type.clone(),
				detail: body,
			})
			.await
	}
}
