//! Event bus error types.

use thiserror::Error;

/// Result type for event operations.
pub type Result<T> = std::result::Result<T, EventError>;

/// Errors returned when putting entries on the event bus.
#[derive(Error, Debug)]
pub enum EventError {
	/// The send itself was rejected by the transport.
	#[error("Failed to send event: {0}")]
	Send(String),

	/// The detail payload could not be serialized.
	#[error("Failed to serialize event detail: {0}")]
	Serialize(String),

	/// Bus configuration is missing or invalid.
	#[error("Event bus configuration error: {0}")]
	Config(String),
}
