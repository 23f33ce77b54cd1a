//! CMS error types.

use thiserror::Error;

/// Result type for CMS operations.
pub type CmsResult<T> = Result<T, CmsError>;

/// Errors raised by the content lifecycle and catalog workflows.
#[derive(Error, Debug)]
pub enum CmsError {
	/// A storage call failed; the message carries the operation-specific prefix.
	#[error(transparent)]
	Storage(#[from] scribe_storages::StorageError),

	/// An event-bus send failed.
	#[error(transparent)]
	Event(#[from] scribe_events::EventError),

	/// Local validation failed before any I/O was attempted.
	#[error("validation failed: {0}")]
	Validation(String),

	/// Publish or release was attempted on an item that was never saved.
	#[error("content has not been saved yet")]
	NotSaved,

	/// Publish or release requires a catalog assignment the item doesn't have.
	#[error("no catalog assigned; select a catalog first")]
	CatalogRequired,

	/// Release was attempted before publish.
	#[error("content has not been published yet")]
	NotPublished,

	/// A catalog operation referenced an entry that doesn't exist.
	#[error("catalog entry not found: {0}")]
	CatalogNotFound(String),

	/// A catalog operation requires an id the entry doesn't carry.
	#[error("catalog id is required")]
	CatalogIdRequired,

	/// One or more media copies failed during publish.
	///
	/// Copies are independent operations: the ones that succeeded are not
	/// undone, and `failed_keys` names the ones that were rejected.
	#[error("{} of {total} media copies failed during publish: {failed_keys:?}", failed_keys.len())]
	MediaCopy {
		/// Total number of copies attempted.
		total: usize,
		/// Keys whose copy was rejected.
		failed_keys: Vec<String>,
	},

	/// The metadata poller gave up after its retry budget.
	///
	/// Distinguishable from a single-attempt transport error; `stale_seen`
	/// records whether any attempt returned a record that was merely too old.
	#[error("gave up waiting for metadata for {id} after {attempts} attempts (stale records seen: {stale_seen})")]
	PollExhausted {
		/// Content item id that was polled.
		id: String,
		/// Number of attempts made.
		attempts: u32,
		/// Whether a stale (out-of-window) record was returned at least once.
		stale_seen: bool,
	},

	/// A metadata poll for this item is already in flight.
	#[error("a metadata poll for {0} is already in flight")]
	PollInProgress(String),

	/// The service container was used before `init`.
	#[error("service not initialized; call init() first")]
	ServiceNotInitialized,

	/// A stored record did not deserialize into the expected shape.
	#[error("invalid stored record: {0}")]
	InvalidRecord(String),

	/// Configuration is missing or invalid.
	#[error("configuration error: {0}")]
	Config(String),
}
