//! Document model adapter: the boundary to the external editing surface.
//!
//! The rich-text framework owns rendering and the node/plugin system; this
//! module only moves portable representations across the boundary: the
//! serialized node tree, the generated HTML, and the storage keys of the
//! `<img>` elements the HTML references.

use regex::Regex;
use serde_json::Value as JsonValue;

use crate::content::MediaEntry;
use crate::{CmsError, CmsResult};

/// Capability the external editing surface provides.
///
/// Implemented by the real editor binding in the host application and by
/// fakes in tests.
pub trait EditorSurface {
	/// Export the current document as a serialized node tree.
	fn serialized_nodes(&self) -> CmsResult<JsonValue>;

	/// Render the current document to HTML.
	fn to_html(&self) -> CmsResult<String>;

	/// Replace the current document with a stored node tree.
	fn hydrate(&mut self, nodes: &JsonValue) -> CmsResult<()>;
}

/// Portable representation extracted from the editing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
	/// Opaque serialized node tree.
	pub nodes: JsonValue,
	/// Generated HTML export.
	pub html: String,
}

impl DocumentSnapshot {
	/// Snapshot from already-exported parts.
	pub fn new(nodes: JsonValue, html: impl Into<String>) -> Self {
		Self {
			nodes,
			html: html.into(),
		}
	}
}

/// Extracts portable content from the editing surface and re-hydrates it.
#[derive(Debug, Clone)]
pub struct DocumentAdapter {
	media_proxy: String,
	img_src: Regex,
}

impl DocumentAdapter {
	/// Adapter that recognizes media served through `media_proxy`.
	pub fn new(media_proxy: impl Into<String>) -> Self {
		Self {
			media_proxy: media_proxy.into(),
			// src delimited by single or double quotes
			img_src: Regex::new(r#"<img[^>]*\ssrc\s*=\s*["']([^"']+)["']"#)
				.expect("static image regex"),
		}
	}

	/// Take a snapshot of the surface's current document.
	pub fn snapshot(&self, surface: &dyn EditorSurface) -> CmsResult<DocumentSnapshot> {
		Ok(DocumentSnapshot {
			nodes: surface.serialized_nodes()?,
			html: surface.to_html()?,
		})
	}

	/// Re-hydrate the surface from a stored node tree.
	pub fn restore(&self, surface: &mut dyn EditorSurface, nodes: &JsonValue) -> CmsResult<()> {
		surface.hydrate(nodes)
	}

	/// Storage keys of every `<img>` in `html`, in document order, deduplicated.
	///
	/// Image sources served through the media proxy are mapped back to their
	/// storage key by stripping the proxy host; relative sources are already
	/// keys. Absolute URLs outside the proxy reference no stored asset and
	/// are skipped.
	pub fn image_keys(&self, html: &str) -> Vec<String> {
		let mut keys = Vec::new();
		for capture in self.img_src.captures_iter(html) {
			let src = &capture[1];
			let Some(key) = self.key_for_src(src) else {
				continue;
			};
			if !keys.contains(&key) {
				keys.push(key);
			}
		}
		keys
	}

	fn key_for_src(&self, src: &str) -> Option<String> {
		if !src.starts_with("http") {
			return Some(src.trim_start_matches('/').to_string());
		}
		if self.media_proxy.is_empty() {
			return None;
		}
		let stripped = src.strip_prefix(self.media_proxy.trim_end_matches('/'))?;
		Some(stripped.trim_start_matches('/').to_string())
	}

	/// Merge newly seen image keys into an existing media manifest.
	///
	/// Existing entries are preserved as-is (the manifest survives reloads);
	/// keys not yet present are appended with an inferred name and type and
	/// the next 1-based order.
	pub fn merge_media(&self, existing: &[MediaEntry], keys: &[String]) -> Vec<MediaEntry> {
		let mut manifest: Vec<MediaEntry> = existing.to_vec();
		for key in keys {
			if manifest.iter().any(|entry| &entry.key == key) {
				continue;
			}
			let order = manifest.len() as u32 + 1;
			manifest.push(MediaEntry {
				name: infer_name(key),
				description: String::new(),
				media_type: infer_type(key),
				order,
				tags: Vec::new(),
				key: key.clone(),
			});
		}
		manifest
	}

	/// Validate a snapshot before persisting it.
	pub fn validate(&self, snapshot: &DocumentSnapshot) -> CmsResult<()> {
		if snapshot.nodes.is_null() {
			return Err(CmsError::Validation(
				"document has no serialized content".to_string(),
			));
		}
		Ok(())
	}
}

/// Display name inferred from the final path segment of a key.
pub(crate) fn infer_name(key: &str) -> String {
	key.rsplit('/').next().unwrap_or(key).to_string()
}

/// Asset type inferred from the file extension.
fn infer_type(key: &str) -> String {
	let extension = key.rsplit('.').next().unwrap_or("").to_lowercase();
	match extension.as_str() {
		"png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" => "image".to_string(),
		_ => "file".to_string(),
	}
}

/// Join a host and a path without doubling or dropping the separator.
///
/// Absolute URLs pass through untouched.
pub fn clean_url(host: &str, url: &str) -> String {
	if url.starts_with("http") {
		return url.to_string();
	}
	match (host.ends_with('/'), url.starts_with('/')) {
		(true, true) => format!("{}{}", host, &url[1..]),
		(false, false) => format!("{}/{}", host, url),
		_ => format!("{}{}", host, url),
	}
}
