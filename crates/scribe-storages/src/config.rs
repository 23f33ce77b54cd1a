//! Configuration types for storage backends.

use crate::{Result, StorageError};
use std::env;
use std::str::FromStr;

/// Storage backend type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendType {
	/// Amazon S3 storage
	S3,
	/// In-memory storage (tests and local development)
	Memory,
}

impl std::fmt::Display for BackendType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			BackendType::S3 => write!(f, "S3"),
			BackendType::Memory => write!(f, "Memory"),
		}
	}
}

impl FromStr for BackendType {
	type Err = StorageError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"s3" => Ok(BackendType::S3),
			"memory" => Ok(BackendType::Memory),
			_ => Err(StorageError::Config(format!("Invalid backend type: {}", s))),
		}
	}
}

/// Configuration for the S3 storage backend.
#[cfg(feature = "s3")]
#[derive(Debug, Clone)]
pub struct S3Config {
	/// AWS region (e.g., "us-east-1")
	pub region: Option<String>,
	/// Custom endpoint URL (for LocalStack or MinIO)
	pub endpoint: Option<String>,
}

/// Storage configuration.
///
/// Buckets are not part of this configuration: every [`ObjectStore`]
/// operation is bucket-addressed, so one client serves the stage, publish and
/// metadata buckets alike.
///
/// [`ObjectStore`]: crate::ObjectStore
#[derive(Debug, Clone)]
pub enum StorageConfig {
	/// Amazon S3.
	#[cfg(feature = "s3")]
	S3(S3Config),
	/// In-memory store.
	#[cfg(feature = "memory")]
	Memory,
}

impl StorageConfig {
	/// Load configuration from environment variables.
	///
	/// # Environment Variables
	///
	/// - `STORAGE_BACKEND`: Backend type ("s3", "memory")
	///
	/// ## S3 Backend
	/// - `S3_REGION`: AWS region (optional)
	/// - `S3_ENDPOINT`: Custom endpoint URL (optional)
	pub fn from_env() -> Result<Self> {
		let backend_type = env::var("STORAGE_BACKEND").map_err(|_| {
			StorageError::Config("STORAGE_BACKEND environment variable not set".to_string())
		})?;

		let backend_type = backend_type.parse::<BackendType>()?;

		match backend_type {
			#[cfg(feature = "s3")]
			BackendType::S3 => {
				let region = env::var("S3_REGION").ok();
				let endpoint = env::var("S3_ENDPOINT").ok();

				Ok(StorageConfig::S3(S3Config { region, endpoint }))
			}
			#[cfg(feature = "memory")]
			BackendType::Memory => Ok(StorageConfig::Memory),
			#[allow(unreachable_patterns)]
			_ => Err(StorageError::Config(format!(
				"Backend type not enabled: {:?}",
				backend_type
			))),
		}
	}
}
