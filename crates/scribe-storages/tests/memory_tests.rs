//! Tests for the in-memory backend against the `ObjectStore` contract.

use chrono::{Duration, Utc};
use rstest::rstest;
use scribe_storages::{MemoryStore, ObjectStore, StorageError};
use serde_json::json;

#[rstest]
#[tokio::test]
async fn test_json_create_and_read_round_trip() {
	let store = MemoryStore::new();
	let record = json!({"title": "Hello", "media": []});

	store.create("stage", "posts/p1", &record).await.unwrap();
	let loaded = store.read("stage", "posts/p1").await.unwrap();

	assert_eq!(loaded, record);
}

#[rstest]
#[tokio::test]
async fn test_update_overwrites_in_place() {
	let store = MemoryStore::new();

	store.create("stage", "posts/p1", &json!({"v": 1})).await.unwrap();
	store.update("stage", "posts/p1", &json!({"v": 2})).await.unwrap();

	let loaded = store.read("stage", "posts/p1").await.unwrap();
	assert_eq!(loaded["v"], 2);
}

#[rstest]
#[tokio::test]
async fn test_read_missing_object_is_not_found() {
	let store = MemoryStore::new();

	let err = store.read("stage", "posts/missing").await.unwrap_err();
	assert!(matches!(err, StorageError::NotFound { .. }));
	assert_eq!(err.to_string(), "Object not found: stage/posts/missing");
}

#[rstest]
#[tokio::test]
async fn test_media_bytes_and_content_type() {
	let store = MemoryStore::new();
	let bytes = vec![0x89, 0x50, 0x4e, 0x47];

	store
		.create_media("stage", "media/x.png", &bytes, "image/png")
		.await
		.unwrap();
	let loaded = store.read_media("stage", "media/x.png").await.unwrap();

	assert_eq!(loaded, bytes);
}

#[rstest]
#[tokio::test]
async fn test_list_media_filters_by_prefix() {
	let store = MemoryStore::new();
	store
		.create_media("stage", "media/a.png", b"a", "image/png")
		.await
		.unwrap();
	store
		.create_media("stage", "media/b.png", b"b", "image/png")
		.await
		.unwrap();
	store.create("stage", "posts/p1", &json!({})).await.unwrap();

	let keys = store.list_media("stage", "media/").await.unwrap();
	assert_eq!(keys, vec!["media/a.png", "media/b.png"]);
}

#[rstest]
#[tokio::test]
async fn test_list_media_empty_is_empty_vec() {
	let store = MemoryStore::new();

	let keys = store.list_media("stage", "media/").await.unwrap();
	assert!(keys.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_copy_object_across_buckets() {
	let store = MemoryStore::new();
	store
		.create_media("stage", "media/x.png", b"pixels", "image/png")
		.await
		.unwrap();

	store
		.copy_object("stage", "media/x.png", "publish", "media/x.png")
		.await
		.unwrap();

	let copied = store.read_media("publish", "media/x.png").await.unwrap();
	assert_eq!(copied, b"pixels");
	// source is untouched
	assert_eq!(store.read_media("stage", "media/x.png").await.unwrap(), b"pixels");
}

#[rstest]
#[tokio::test]
async fn test_copy_missing_source_fails_with_copy_prefix() {
	let store = MemoryStore::new();

	let err = store
		.copy_object("stage", "media/missing.png", "publish", "media/missing.png")
		.await
		.unwrap_err();

	assert!(err.to_string().starts_with("Failed to copy object:"));
}

#[rstest]
#[tokio::test]
async fn test_denied_key_rejects_write_with_operation_prefix() {
	let store = MemoryStore::new();
	store.deny_key("posts/p1");

	let err = store.create("stage", "posts/p1", &json!({})).await.unwrap_err();
	assert!(err.to_string().starts_with("Failed to create object:"));
}

#[rstest]
#[tokio::test]
async fn test_write_log_records_every_write_in_order() {
	let store = MemoryStore::new();

	store.create("stage", "posts/p1", &json!({})).await.unwrap();
	store
		.create_media("stage", "media/x.png", b"x", "image/png")
		.await
		.unwrap();
	store
		.copy_object("stage", "media/x.png", "publish", "media/x.png")
		.await
		.unwrap();

	assert_eq!(
		store.write_log(),
		vec!["stage/posts/p1", "stage/media/x.png", "publish/media/x.png"]
	);
}

#[rstest]
#[tokio::test]
async fn test_backdate_moves_last_modified() {
	let store = MemoryStore::new();
	store.create("meta", "data/p1", &json!({})).await.unwrap();

	let old = Utc::now() - Duration::minutes(20);
	store.backdate("meta", "data/p1", old);

	let modified = store.last_modified("meta", "data/p1").await.unwrap();
	assert_eq!(modified, old);
}

#[rstest]
#[tokio::test]
async fn test_delete_then_read_is_not_found() {
	let store = MemoryStore::new();
	store.create("stage", "posts/p1", &json!({})).await.unwrap();

	store.delete("stage", "posts/p1").await.unwrap();

	assert!(store.read("stage", "posts/p1").await.is_err());
}
