//! Amazon EventBridge bus implementation.

use async_trait::async_trait;
use aws_sdk_eventbridge::Client;
use aws_sdk_eventbridge::types::PutEventsRequestEntry;

use crate::bus::{EventBus, EventEntry};
use crate::{EventError, Result};

/// EventBridge-backed bus.
#[derive(Debug, Clone)]
pub struct EventBridgeBus {
	client: Client,
}

impl EventBridgeBus {
	/// Create a bus client from the ambient AWS credential chain.
	pub async fn new(region: Option<String>) -> Self {
		let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
		if let Some(region) = region {
			loader = loader.region(aws_config::Region::new(region));
		}
		let shared = loader.load().await;
		Self {
			client: Client::new(&shared),
		}
	}

	/// Wrap an already-configured EventBridge client.
	pub fn from_client(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl EventBus for EventBridgeBus {
	async fn put_event(&self, entry: EventEntry) -> Result<()> {
		let request_entry = PutEventsRequestEntry::builder()
			.event_bus_name(entry.bus_name)
			.source(entry.source)
			.detail_type(entry.detail_type)
			.detail(entry.detail.to_string())
			.build();

		let response = self
			.client
			.put_events()
			.entries(request_entry)
			.send()
			.await
			.map_err(|e| EventError::Send(e.to_string()))?;

		// PutEvents reports per-entry failures in-band, not as a call error
		if response.failed_entry_count() > 0 {
			let message = response
				.entries()
				.iter()
				.find_map(|e| e.error_message().map(str::to_string))
				.unwrap_or_else(|| "entry rejected by event bus".to_string());
			return Err(EventError::Send(message));
		}
		Ok(())
	}
}
