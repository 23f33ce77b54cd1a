//! Storage backend implementations.

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "s3")]
pub mod s3;
