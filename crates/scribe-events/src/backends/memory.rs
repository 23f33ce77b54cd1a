//! In-memory event bus for tests.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::bus::{EventBus, EventEntry};
use crate::{EventError, Result};

/// Records every entry instead of sending it anywhere.
#[derive(Debug, Default)]
pub struct MemoryBus {
	sent: Mutex<Vec<EventEntry>>,
	fail_sends: Mutex<bool>,
}

impl MemoryBus {
	/// Create an empty bus.
	pub fn new() -> Self {
		Self::default()
	}

	/// Every entry put on the bus so far, in order.
	pub fn sent(&self) -> Vec<EventEntry> {
		self.sent.lock().clone()
	}

	/// Make all subsequent sends fail.
	pub fn fail_sends(&self) {
		*self.fail_sends.lock() = true;
	}
}

#[async_trait]
impl EventBus for MemoryBus {
	async fn put_event(&self, entry: EventEntry) -> Result<()> {
		if *self.fail_sends.lock() {
			return Err(EventError::Send("bus unavailable".to_string()));
		}
		self.sent.lock().push(entry);
		Ok(())
	}
}
