//! Event bus trait definition.

use crate::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// One entry put on a named event bus.
///
/// The envelope shape mirrors the generic "publish one entry to a named event
/// bus" primitive: a bus name, a source tag used for routing, a detail type,
/// and an opaque JSON detail body.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEntry {
	/// Name of the destination bus.
	pub bus_name: String,
	/// Source tag for event-bus routing (e.g. `content.published`).
	pub source: String,
	/// Detail type (e.g. `content-changes`).
	pub detail_type: String,
	/// JSON detail body.
	pub detail: JsonValue,
}

/// Capability interface for the event bus transport.
#[async_trait]
pub trait EventBus: Send + Sync {
	/// Put one entry on the bus.
	///
	/// # Errors
	///
	/// Returns `` `EventError::Send` `` if the transport rejects the entry.
	/// There is no retry at this layer.
	async fn put_event(&self, entry: EventEntry) -> Result<()>;
}
