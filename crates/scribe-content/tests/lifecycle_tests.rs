//! Lifecycle orchestrator tests over in-memory backends.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use serde_json::json;

use scribe_content::content::stage_key;
use scribe_content::prelude::*;
use scribe_events::MemoryBus;
use scribe_storages::{MemoryStore, ObjectStore};

fn test_config() -> CmsConfig {
	let mut config = CmsConfig::new("stage", "publish", "meta");
	config.event_bus_name = "cms-bus".to_string();
	config.media_proxy = "https://media.example.com".to_string();
	config.preview_url = "https://preview.example.com".to_string();
	config.release_url = "https://released.example.com".to_string();
	config.poll_max_retries = 3;
	config.poll_delay = Duration::from_millis(1);
	config
}

fn harness() -> (Arc<MemoryStore>, Arc<MemoryBus>, Lifecycle) {
	let store = Arc::new(MemoryStore::new());
	let bus = Arc::new(MemoryBus::new());
	let lifecycle = Lifecycle::new(store.clone(), bus.clone(), test_config());
	(store, bus, lifecycle)
}

async fn seed_metadata(store: &MemoryStore, id: &str, record: serde_json::Value) {
	store.create("meta", &format!("data/{}", id), &record)
		.await
		.unwrap();
}

fn fresh_record(id: &str) -> serde_json::Value {
	json!({
		"postKey": format!("posts/{}", id),
		"src": format!("posts/{}", id),
		"published": true,
		"publishedDate": Utc::now().to_rfc3339(),
		"source": {"key": format!("ready-to-publish/{}/snap", id)},
		"preview": {"catalogEntryUri": format!("https://preview.example.com/{}", id)},
		"released": false
	})
}

fn snapshot_with(html: &str) -> DocumentSnapshot {
	DocumentSnapshot::new(json!({"root": {"children": []}}), html)
}

#[tokio::test]
async fn save_assigns_id_once_and_overwrites_stage_record() {
	let (store, _bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	let snapshot = snapshot_with("<p>Hello</p>");

	lifecycle.save(&mut item, &snapshot).await.unwrap();
	let id = item.id.clone().unwrap();
	let first_saved = item.date_saved;
	let config = test_config();
	let mut first = store.read("stage", &stage_key(&config, &id))
		.await
		.unwrap();

	lifecycle.save(&mut item, &snapshot).await.unwrap();
	assert_eq!(item.id.as_deref(), Some(id.as_str()));
	assert!(item.date_saved >= first_saved);

	// both saves landed on the same stage key
	let key = format!("stage/posts/{}", id);
	let log = store.write_log();
	assert_eq!(log, vec![key.clone(), key]);

	// the second record is identical except the refreshed save date
	let mut second = store.read("stage", &stage_key(&config, &id))
		.await
		.unwrap();
	first.as_object_mut().unwrap().remove("dateSaved");
	second.as_object_mut().unwrap().remove("dateSaved");
	assert_eq!(first, second);
}

#[tokio::test]
async fn save_rejects_empty_title_before_any_io() {
	let (store, _bus, lifecycle) = harness();
	let mut item = ContentItem::new("  ", "jane");

	let error = lifecycle
		.save(&mut item, &snapshot_with("<p>x</p>"))
		.await
		.unwrap_err();
	assert!(matches!(error, CmsError::Validation(_)));
	assert!(store.write_log().is_empty());
	assert!(item.id.is_none());
}

#[tokio::test]
async fn save_deduplicates_manifest_by_storage_key() {
	let (_store, _bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.catalog_id = Some("cat-9".to_string());

	// x.png appears twice (proxied and relative), y.png once
	let html = concat!(
		"<img src=\"https://media.example.com/media/x.png\">",
		"<p>body</p>",
		"<img src=\"/media/x.png\">",
		"<img src=\"media/y.png\">",
	);
	lifecycle.save(&mut item, &snapshot_with(html)).await.unwrap();

	assert_eq!(item.media.len(), 2);
	assert_eq!(item.media[0].key, "media/x.png");
	assert_eq!(item.media[0].order, 1);
	assert_eq!(item.media[1].key, "media/y.png");
	assert_eq!(item.media[1].order, 2);
	assert_eq!(item.media[0].media_type, "image");
}

#[tokio::test]
async fn save_preserves_existing_manifest_entries() {
	let (_store, _bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");

	lifecycle
		.save(&mut item, &snapshot_with("<img src=\"media/x.png\">"))
		.await
		.unwrap();
	item.media[0].description = "hand-written".to_string();

	lifecycle
		.save(
			&mut item,
			&snapshot_with("<img src=\"media/x.png\"><img src=\"media/y.png\">"),
		)
		.await
		.unwrap();

	assert_eq!(item.media.len(), 2);
	assert_eq!(item.media[0].description, "hand-written");
	assert_eq!(item.media[1].order, 2);
}

#[tokio::test]
async fn publish_rejects_unsaved_item() {
	let (store, bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.catalog_id = Some("cat-9".to_string());

	let error = lifecycle
		.publish(&mut item, &snapshot_with("<p>x</p>"))
		.await
		.unwrap_err();
	assert!(matches!(error, CmsError::NotSaved));
	assert!(store.write_log().is_empty());
	assert!(bus.sent().is_empty());
}

#[tokio::test]
async fn publish_rejects_item_without_catalog() {
	let (store, bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	let snapshot = snapshot_with("<p>x</p>");
	lifecycle.save(&mut item, &snapshot).await.unwrap();
	let writes_after_save = store.write_log().len();

	let error = lifecycle.publish(&mut item, &snapshot).await.unwrap_err();
	assert!(matches!(error, CmsError::CatalogRequired));
	assert_eq!(store.write_log().len(), writes_after_save);
	assert!(bus.sent().is_empty());
	assert!(!item.published);
}

#[tokio::test]
async fn republish_leaves_earlier_snapshot_untouched() {
	let (store, _bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.catalog_id = Some("cat-9".to_string());
	let snapshot = snapshot_with("<p>first</p>");
	lifecycle.save(&mut item, &snapshot).await.unwrap();
	let id = item.id.clone().unwrap();
	seed_metadata(&store, &id, fresh_record(&id)).await;

	let outcome = lifecycle.publish(&mut item, &snapshot).await.unwrap();
	assert_eq!(outcome, PublishOutcome::Published);
	let first_key = item.published_data.clone().unwrap().key;
	let first_snapshot = store.read("publish", &first_key)
		.await
		.unwrap();

	let edited = snapshot_with("<p>second</p>");
	lifecycle.save(&mut item, &edited).await.unwrap();
	lifecycle.publish(&mut item, &edited).await.unwrap();
	let second_key = item.published_data.clone().unwrap().key;

	assert_ne!(first_key, second_key);
	let first_again = store.read("publish", &first_key)
		.await
		.unwrap();
	assert_eq!(first_snapshot, first_again);
}

#[tokio::test]
async fn publish_copies_manifest_media_and_exports_html() {
	let (store, _bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.catalog_id = Some("cat-9".to_string());

	for key in ["media/x.png", "media/y.png"] {
		store.create_media("stage", key, b"png", "image/png")
			.await
			.unwrap();
	}
	let snapshot = snapshot_with("<img src=\"media/x.png\"><img src=\"media/y.png\">");
	lifecycle.save(&mut item, &snapshot).await.unwrap();
	let id = item.id.clone().unwrap();
	seed_metadata(&store, &id, fresh_record(&id)).await;

	lifecycle.publish(&mut item, &snapshot).await.unwrap();

	let publish_key = item.published_data.clone().unwrap().key;
	for key in ["media/x.png", "media/y.png"] {
		store.read_media("publish", key)
			.await
			.unwrap();
	}
	let html = store
		.read_media("publish", &format!("{}.html", publish_key))
		.await
		.unwrap();
	assert_eq!(html, snapshot.html.as_bytes());
}

#[tokio::test]
async fn publish_surfaces_partial_media_copy_failure() {
	let (store, _bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.catalog_id = Some("cat-9".to_string());

	for key in ["media/x.png", "media/y.png"] {
		store.create_media("stage", key, b"png", "image/png")
			.await
			.unwrap();
	}
	let snapshot = snapshot_with("<img src=\"media/x.png\"><img src=\"media/y.png\">");
	lifecycle.save(&mut item, &snapshot).await.unwrap();
	store.deny_key("media/y.png");

	let error = lifecycle.publish(&mut item, &snapshot).await.unwrap_err();
	match error {
		CmsError::MediaCopy { total, failed_keys } => {
			assert_eq!(total, 2);
			assert_eq!(failed_keys, vec!["media/y.png".to_string()]);
		}
		other => panic!("expected MediaCopy, got {:?}", other),
	}

	// the completed copy is not undone
	store.read_media("publish", "media/x.png")
		.await
		.unwrap();
	assert!(!item.published);
}

#[tokio::test]
async fn publish_without_metadata_reports_pending() {
	let (store, _bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.catalog_id = Some("cat-9".to_string());
	let snapshot = snapshot_with("<p>x</p>");
	lifecycle.save(&mut item, &snapshot).await.unwrap();

	let outcome = lifecycle.publish(&mut item, &snapshot).await.unwrap();
	assert_eq!(outcome, PublishOutcome::MetadataPending);

	// the snapshot itself is durable
	assert!(item.published);
	let publish_key = item.published_data.clone().unwrap().key;
	store.read("publish", &publish_key)
		.await
		.unwrap();
	assert!(item.preview.is_none());
}

#[tokio::test]
async fn release_rejects_unpublished_item() {
	let (_store, bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.id = Some("p1".to_string());
	item.catalog_id = Some("cat-9".to_string());

	let error = lifecycle.release(&mut item).await.unwrap_err();
	assert!(matches!(error, CmsError::NotPublished));
	assert!(bus.sent().is_empty());
}

#[tokio::test]
async fn release_fails_hard_when_metadata_is_missing() {
	let (_store, bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.id = Some("p1".to_string());
	item.catalog_id = Some("cat-9".to_string());
	item.published = true;

	let error = lifecycle.release(&mut item).await.unwrap_err();
	assert!(matches!(error, CmsError::Storage(_)));
	assert!(bus.sent().is_empty());
}

#[tokio::test]
async fn release_sends_event_and_confirms() {
	let (store, bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.id = Some("p1".to_string());
	item.catalog_id = Some("cat-9".to_string());
	item.published = true;
	seed_metadata(&store, "p1", fresh_record("p1")).await;

	let outcome = lifecycle.release(&mut item).await.unwrap();
	assert_eq!(outcome, ReleaseOutcome::Released);
	assert!(item.released);
	assert_eq!(
		item.preview.as_ref().unwrap().catalog_entry_uri,
		"https://preview.example.com/p1"
	);

	let sent = bus.sent();
	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].bus_name, "cms-bus");
	assert_eq!(sent[0].source, "content.published");
	assert_eq!(sent[0].detail_type, "content-changes");
	assert_eq!(sent[0].detail["postKey"], "ready-to-publish/p1/snap");
	assert_eq!(sent[0].detail["metadataKey"], "data/p1");
	assert_eq!(sent[0].detail["catalogId"], "cat-9");
	assert_eq!(sent[0].detail["title"], "Hello");

	// confirmed state is persisted to the stage record
	let config = test_config();
	let stored = store.read("stage", &stage_key(&config, "p1"))
		.await
		.unwrap();
	assert_eq!(stored["released"], true);
}

#[tokio::test]
async fn release_confirmation_fills_missing_release_uri() {
	let (store, _bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.id = Some("p1".to_string());
	item.catalog_id = Some("cat-9".to_string());
	item.published = true;
	// downstream confirms without reporting a release location
	seed_metadata(&store, "p1", fresh_record("p1")).await;

	let outcome = lifecycle.release(&mut item).await.unwrap();
	assert_eq!(outcome, ReleaseOutcome::Released);
	assert_eq!(
		item.release.as_ref().unwrap().catalog_entry_uri,
		"https://released.example.com/p1"
	);
}

#[tokio::test]
async fn release_with_stale_metadata_stays_unreleased() {
	let (store, bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.id = Some("p1".to_string());
	item.catalog_id = Some("cat-9".to_string());
	item.published = true;

	// old enough for the initial read, too old for the confirmation poll
	let mut record = fresh_record("p1");
	record["publishedDate"] =
		json!((Utc::now() - ChronoDuration::minutes(20)).to_rfc3339());
	seed_metadata(&store, "p1", record).await;

	let outcome = lifecycle.release(&mut item).await.unwrap();
	assert_eq!(outcome, ReleaseOutcome::MetadataPending);
	assert!(!item.released);
	// the event went out exactly once and is not retried
	assert_eq!(bus.sent().len(), 1);
}

#[tokio::test]
async fn release_event_failure_propagates() {
	let (store, bus, lifecycle) = harness();
	let mut item = ContentItem::new("Hello", "jane");
	item.id = Some("p1".to_string());
	item.catalog_id = Some("cat-9".to_string());
	item.published = true;
	seed_metadata(&store, "p1", fresh_record("p1")).await;
	bus.fail_sends();

	let error = lifecycle.release(&mut item).await.unwrap_err();
	assert!(matches!(error, CmsError::Event(_)));
	assert!(!item.released);
}

#[tokio::test]
async fn load_reconciles_externally_generated_image() {
	let (store, _bus, lifecycle) = harness();
	let config = test_config();

	let mut item = ContentItem::new("Hello", "jane");
	item.id = Some("p1".to_string());
	item.published = true;
	item.media.push(MediaEntry {
		name: "x.png".to_string(),
		description: String::new(),
		media_type: "image".to_string(),
		order: 1,
		tags: vec![],
		key: "media/x.png".to_string(),
	});
	store
		.create("stage", &stage_key(&config, "p1"), &serde_json::to_value(&item).unwrap())
		.await
		.unwrap();

	let mut record = fresh_record("p1");
	record["aiImageGenerated"] = json!(true);
	record["aiImageDetails"] = json!({
		"origSrc": "media/gen.png",
		"pubSrc": "",
		"title": "Generated cover",
		"description": "",
		"type": "image"
	});
	seed_metadata(&store, "p1", record).await;
	store
		.create_media("publish", "media/gen.png", b"png", "image/png")
		.await
		.unwrap();

	let loaded = lifecycle.load("p1").await.unwrap();
	assert_eq!(loaded.media.len(), 2);
	assert_eq!(loaded.media[1].key, "media/gen.png");
	assert_eq!(loaded.media[1].name, "Generated cover");
	assert_eq!(loaded.media[1].order, 2);

	// the asset was copied into the stage store and the record rewritten
	store.read_media("stage", "media/gen.png")
		.await
		.unwrap();
	let stored = store.read("stage", &stage_key(&config, "p1"))
		.await
		.unwrap();
	assert_eq!(stored["media"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn load_is_idempotent_for_reconciled_image() {
	let (store, _bus, lifecycle) = harness();
	let config = test_config();

	let mut item = ContentItem::new("Hello", "jane");
	item.id = Some("p1".to_string());
	item.published = true;
	store
		.create("stage", &stage_key(&config, "p1"), &serde_json::to_value(&item).unwrap())
		.await
		.unwrap();
	let mut record = fresh_record("p1");
	record["aiImageGenerated"] = json!(true);
	record["aiImageDetails"] = json!({"origSrc": "media/gen.png", "title": "Generated"});
	seed_metadata(&store, "p1", record).await;
	store
		.create_media("publish", "media/gen.png", b"png", "image/png")
		.await
		.unwrap();

	let first = lifecycle.load("p1").await.unwrap();
	let second = lifecycle.load("p1").await.unwrap();
	assert_eq!(first.media.len(), 1);
	assert_eq!(second.media.len(), 1);
}

#[tokio::test]
async fn load_without_metadata_still_returns_item() {
	let (store, _bus, lifecycle) = harness();
	let config = test_config();
	let mut item = ContentItem::new("Hello", "jane");
	item.id = Some("p1".to_string());
	item.published = true;
	store
		.create("stage", &stage_key(&config, "p1"), &serde_json::to_value(&item).unwrap())
		.await
		.unwrap();

	let loaded = lifecycle.load("p1").await.unwrap();
	assert_eq!(loaded.id.as_deref(), Some("p1"));
}
