//! Document boundary tests: image key extraction, manifest merge, URL
//! cleaning and node-tree round-tripping.

use rstest::rstest;
use serde_json::{Value as JsonValue, json};

use scribe_content::content::MediaEntry;
use scribe_content::document::{DocumentAdapter, EditorSurface, clean_url};
use scribe_content::CmsResult;

fn adapter() -> DocumentAdapter {
	DocumentAdapter::new("https://media.example.com")
}

#[test]
fn image_keys_strips_proxy_and_deduplicates() {
	let html = concat!(
		"<img class=\"hero\" src=\"https://media.example.com/media/x.png\">",
		"<img src='/media/x.png'>",
		"<img src=\"media/y.png\" alt=\"y\">",
	);
	assert_eq!(
		adapter().image_keys(html),
		vec!["media/x.png".to_string(), "media/y.png".to_string()]
	);
}

#[test]
fn image_keys_skips_external_urls() {
	let html = "<img src=\"https://elsewhere.example.org/pic.png\"><img src=\"media/a.png\">";
	assert_eq!(adapter().image_keys(html), vec!["media/a.png".to_string()]);
}

#[test]
fn image_keys_without_proxy_skips_all_absolute_urls() {
	let adapter = DocumentAdapter::new("");
	let html = "<img src=\"https://media.example.com/media/x.png\">";
	assert!(adapter.image_keys(html).is_empty());
}

#[test]
fn merge_media_appends_with_next_order_and_inferred_fields() {
	let existing = vec![MediaEntry {
		name: "x.png".to_string(),
		description: "cover".to_string(),
		media_type: "image".to_string(),
		order: 1,
		tags: vec!["hero".to_string()],
		key: "media/x.png".to_string(),
	}];
	let keys = vec!["media/x.png".to_string(), "media/notes.pdf".to_string()];

	let merged = adapter().merge_media(&existing, &keys);
	assert_eq!(merged.len(), 2);
	assert_eq!(merged[0], existing[0]);
	assert_eq!(merged[1].name, "notes.pdf");
	assert_eq!(merged[1].media_type, "file");
	assert_eq!(merged[1].order, 2);
}

#[rstest]
#[case("https://host.example.com/", "/media/x.png", "https://host.example.com/media/x.png")]
#[case("https://host.example.com", "media/x.png", "https://host.example.com/media/x.png")]
#[case("https://host.example.com/", "media/x.png", "https://host.example.com/media/x.png")]
#[case("https://host.example.com", "/media/x.png", "https://host.example.com/media/x.png")]
#[case("https://host.example.com", "https://other.example.com/a.png", "https://other.example.com/a.png")]
fn clean_url_joins_without_doubled_separators(
	#[case] host: &str,
	#[case] url: &str,
	#[case] expected: &str,
) {
	assert_eq!(clean_url(host, url), expected);
}

struct FakeSurface {
	nodes: JsonValue,
}

impl EditorSurface for FakeSurface {
	fn serialized_nodes(&self) -> CmsResult<JsonValue> {
		Ok(self.nodes.clone())
	}

	fn to_html(&self) -> CmsResult<String> {
		Ok("<p>rendered</p>".to_string())
	}

	fn hydrate(&mut self, nodes: &JsonValue) -> CmsResult<()> {
		self.nodes = nodes.clone();
		Ok(())
	}
}

#[test]
fn snapshot_then_restore_is_a_fixed_point() {
	let adapter = adapter();
	let tree = json!({"root": {"children": [{"type": "paragraph", "text": "hi"}]}});
	let original = FakeSurface {
		nodes: tree.clone(),
	};

	let snapshot = adapter.snapshot(&original).unwrap();
	let mut restored = FakeSurface {
		nodes: JsonValue::Null,
	};
	adapter.restore(&mut restored, &snapshot.nodes).unwrap();

	let again = adapter.snapshot(&restored).unwrap();
	assert_eq!(again.nodes, tree);
	assert_eq!(again, snapshot);
}

#[test]
fn validate_rejects_empty_document() {
	let adapter = adapter();
	let snapshot = scribe_content::document::DocumentSnapshot::new(JsonValue::Null, "");
	assert!(adapter.validate(&snapshot).is_err());

	let snapshot = scribe_content::document::DocumentSnapshot::new(json!({"root": []}), "");
	assert!(adapter.validate(&snapshot).is_ok());
}
