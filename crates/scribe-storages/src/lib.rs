//! # scribe-storages
//!
//! Object storage gateway for the Scribe CMS.
//!
//! This crate provides a unified interface over bucket-addressed blob stores.
//! Content records are JSON documents, exported pages are HTML documents, and
//! editor assets are opaque media blobs; all three live in buckets with
//! prefix-based namespacing and can be copied server-side between buckets
//! (stage to publish and back).
//!
//! ## Features
//!
//! - **Unified API**: a single `` `ObjectStore` `` trait for every backend
//! - **Async I/O**: all operations are asynchronous using Tokio
//! - **Feature flags**: enable only the backends you need
//! - **Server-side copy**: cross-bucket copies with no local byte transfer
//!
//! ## Example
//!
//! ```rust,no_run
//! use scribe_storages::{ObjectStore, StorageConfig, create_store};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorageConfig::from_env()?;
//!     let store = create_store(config).await?;
//!
//!     store.create("stage-bucket", "posts/p1", &json!({"title": "Hello"})).await?;
//!     let record = store.read("stage-bucket", "posts/p1").await?;
//!
//!     store
//!         .copy_object("stage-bucket", "posts/p1", "publish-bucket", "posts/p1")
//!         .await?;
//!     # let _ = record;
//!     Ok(())
//! }
//! ```

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod store;

pub use config::StorageConfig;
pub use error::{Result, StorageError};
pub use factory::create_store;
pub use store::ObjectStore;

#[cfg(feature = "memory")]
pub use backends::memory::MemoryStore;
