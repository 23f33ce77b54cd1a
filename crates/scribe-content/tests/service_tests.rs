//! Service container and media library tests.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use scribe_content::media::MediaLibrary;
use scribe_content::prelude::*;
use scribe_events::MemoryBus;
use scribe_storages::{MemoryStore, ObjectStore, StorageError};

fn test_config() -> CmsConfig {
	let mut config = CmsConfig::new("stage", "publish", "meta");
	config.media_proxy = "https://media.example.com".to_string();
	config.poll_max_retries = 1;
	config.poll_delay = Duration::from_millis(1);
	config
}

#[tokio::test]
async fn service_is_unusable_before_init() {
	let service = DataService::new(test_config());
	assert!(!service.is_ready());
	let error = service.service().unwrap_err();
	assert!(matches!(error, CmsError::ServiceNotInitialized));
}

#[tokio::test]
async fn init_wires_backends_and_cleanup_resets() {
	let data_service = DataService::new(test_config());
	data_service.init(Arc::new(MemoryStore::new()), Arc::new(MemoryBus::new()));
	assert!(data_service.is_ready());

	let service = data_service.service().unwrap();
	let mut item = ContentItem::new("Hello", "jane");
	let snapshot = DocumentSnapshot::new(json!({"root": []}), "<p>Hello</p>");
	service.lifecycle().save(&mut item, &snapshot).await.unwrap();
	assert!(item.id.is_some());

	data_service.cleanup();
	assert!(!data_service.is_ready());
	assert!(data_service.service().is_err());

	// a handle taken before cleanup keeps working
	service.lifecycle().save(&mut item, &snapshot).await.unwrap();
}

#[tokio::test]
async fn delete_content_removes_only_the_stage_record() {
	let store = Arc::new(MemoryStore::new());
	let data_service = DataService::new(test_config());
	data_service.init(store.clone(), Arc::new(MemoryBus::new()));
	let service = data_service.service().unwrap();

	let mut item = ContentItem::new("Hello", "jane");
	let snapshot = DocumentSnapshot::new(json!({"root": []}), "<p>Hello</p>");
	service.lifecycle().save(&mut item, &snapshot).await.unwrap();
	let id = item.id.clone().unwrap();

	service.delete_content(&id).await.unwrap();
	let error = store
		.read("stage", &format!("posts/{}", id))
		.await
		.unwrap_err();
	assert!(matches!(error, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn media_upload_keys_carry_timestamp_and_filename() {
	let store = Arc::new(MemoryStore::new());
	let library = MediaLibrary::new(store.clone(), test_config());

	let key = library
		.upload("cat.png", b"png".to_vec(), "image/png")
		.await
		.unwrap();
	assert!(key.starts_with("media/"));
	assert!(key.ends_with("_cat.png"));

	assert_eq!(library.list().await.unwrap(), vec![key.clone()]);
	assert_eq!(library.read(&key).await.unwrap(), b"png".to_vec());
	assert_eq!(
		library.display_url(&key),
		format!("https://media.example.com/{}", key)
	);

	library.delete(&key).await.unwrap();
	assert!(library.list().await.unwrap().is_empty());
}
