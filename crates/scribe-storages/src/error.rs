//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors returned by [`ObjectStore`](crate::ObjectStore) implementations.
///
/// Every failed call is wrapped with a fixed, human-readable prefix naming the
/// operation that failed. Callers treat these as opaque: the message is for
/// diagnostics, not for programmatic recovery.
#[derive(Error, Debug)]
pub enum StorageError {
	/// Creating a JSON or HTML object failed.
	#[error("Failed to create object: {0}")]
	Create(String),

	/// Reading a JSON object failed.
	#[error("Failed to read object: {0}")]
	Read(String),

	/// Updating a JSON object failed.
	#[error("Failed to update object: {0}")]
	Update(String),

	/// Deleting an object failed.
	#[error("Failed to delete object: {0}")]
	Delete(String),

	/// Creating a media blob failed.
	#[error("Failed to create media: {0}")]
	CreateMedia(String),

	/// Reading a media blob failed.
	#[error("Failed to read media: {0}")]
	ReadMedia(String),

	/// Listing keys under a prefix failed.
	#[error("Failed to list media: {0}")]
	ListMedia(String),

	/// A server-side copy failed.
	#[error("Failed to copy object: {0}")]
	Copy(String),

	/// The requested object does not exist.
	#[error("Object not found: {bucket}/{key}")]
	NotFound {
		/// Bucket that was addressed.
		bucket: String,
		/// Key that was addressed.
		key: String,
	},

	/// A stored object could not be parsed as JSON.
	#[error("Invalid JSON in object {key}: {message}")]
	InvalidJson {
		/// Key of the malformed object.
		key: String,
		/// Parser error message.
		message: String,
	},

	/// Backend configuration is missing or invalid.
	#[error("Storage configuration error: {0}")]
	Config(String),
}
