//! Service container with an explicit init/ready/cleanup lifetime.
//!
//! The backing store and event bus are constructed by the host (native
//! clients and tests wire different backends), so the container starts empty
//! and every accessor before `init` fails with a readiness error instead of
//! panicking.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use scribe_events::{EventBus, EventNotifier};
use scribe_storages::ObjectStore;

use crate::catalog::CatalogRegistry;
use crate::config::CmsConfig;
use crate::content::stage_key;
use crate::lifecycle::Lifecycle;
use crate::media::MediaLibrary;
use crate::{CmsError, CmsResult};

/// The assembled CMS core: lifecycle, catalogs and media over one store.
pub struct CmsService {
	store: Arc<dyn ObjectStore>,
	config: CmsConfig,
	lifecycle: Lifecycle,
	catalogs: CatalogRegistry,
	media: MediaLibrary,
}

impl std::fmt::Debug for CmsService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CmsService")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl CmsService {
	/// Assemble the service over a store and an event bus.
	pub fn new(store: Arc<dyn ObjectStore>, bus: Arc<dyn EventBus>, config: CmsConfig) -> Self {
		let notifier = EventNotifier::new(bus.clone(), config.notifier_config());
		Self {
			lifecycle: Lifecycle::new(store.clone(), bus, config.clone()),
			catalogs: CatalogRegistry::new(store.clone(), notifier, config.clone()),
			media: MediaLibrary::new(store.clone(), config.clone()),
			store,
			config,
		}
	}

	/// The content lifecycle orchestrator.
	pub fn lifecycle(&self) -> &Lifecycle {
		&self.lifecycle
	}

	/// The catalog registry.
	pub fn catalogs(&self) -> &CatalogRegistry {
		&self.catalogs
	}

	/// The media library.
	pub fn media(&self) -> &MediaLibrary {
		&self.media
	}

	/// Remove a content item's stage record.
	///
	/// Administrative operation; published snapshots and copied media are
	/// immutable and stay in place.
	pub async fn delete_content(&self, id: &str) -> CmsResult<()> {
		let key = stage_key(&self.config, id);
		self.store.delete(&self.config.stage_bucket, &key).await?;
		info!(id, "deleted content stage record");
		Ok(())
	}
}

/// Holds the [`CmsService`] across an application session.
///
/// `service()` hands out cheap clones of the inner `Arc`; callers never hold
/// the lock across an await.
pub struct DataService {
	config: CmsConfig,
	inner: RwLock<Option<Arc<CmsService>>>,
}

impl DataService {
	/// An uninitialized container for the given configuration.
	pub fn new(config: CmsConfig) -> Self {
		Self {
			config,
			inner: RwLock::new(None),
		}
	}

	/// Wire the container to concrete backends. Re-initializing replaces the
	/// previous service.
	pub fn init(&self, store: Arc<dyn ObjectStore>, bus: Arc<dyn EventBus>) {
		let service = Arc::new(CmsService::new(store, bus, self.config.clone()));
		*self.inner.write() = Some(service);
		info!("data service initialized");
	}

	/// Whether `init` has been called.
	pub fn is_ready(&self) -> bool {
		self.inner.read().is_some()
	}

	/// The assembled service, or a readiness error before `init`.
	pub fn service(&self) -> CmsResult<Arc<CmsService>> {
		self.inner
			.read()
			.clone()
			.ok_or(CmsError::ServiceNotInitialized)
	}

	/// Drop the assembled service; subsequent `service()` calls fail until
	/// the next `init`.
	pub fn cleanup(&self) {
		*self.inner.write() = None;
		info!("data service cleaned up");
	}
}
