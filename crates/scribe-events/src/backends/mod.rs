//! Event bus backend implementations.

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "eventbridge")]
pub mod eventbridge;
