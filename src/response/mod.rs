//! Response assembly: composes normalizer and sub-extractor output into the
//! fixed envelope shapes the API serves.
//!
//! Two modes exist — profile search and media search — plus a label template
//! for the divergent field casings observed across deployments. Everything
//! here is a pure function of already-fetched records plus request-scoped
//! metadata supplied by the caller; no clock reads, no I/O.

pub mod labels;
pub mod media;
pub mod profile;

use crate::fetch::record::ProfileRecord;
use serde_json::{json, Map, Value};

pub use labels::{LabelSet, LabelStyle, SNAKE_LABELS, TITLE_LABELS};
pub use media::{media_envelope, AuthorBlock};
pub use profile::{profile_envelope, recent_posts};

/// Request-scoped metadata for the `search_metadata` block.
///
/// The core never reads the wall clock; the web layer (or CLI) stamps these.
#[derive(Debug, Clone)]
pub struct SearchMeta {
    pub id: String,
    /// UTC creation timestamp; only profile-mode envelopes carry it
    pub created_at: Option<String>,
    pub elapsed_secs: f64,
}

impl SearchMeta {
    /// Render the `search_metadata` block, with the optional request URL
    /// profile mode includes.
    fn to_value(&self, request_url: Option<&str>) -> Value {
        let mut block = Map::new();
        block.insert("id".into(), json!(self.id));
        block.insert("status".into(), json!("Success"));
        if let Some(ref created_at) = self.created_at {
            block.insert("created_at".into(), json!(created_at));
        }
        block.insert("request_time_taken".into(), json!(self.elapsed_secs));
        if let Some(url) = request_url {
            block.insert("request_url".into(), json!(url));
        }
        Value::Object(block)
    }
}

/// Derive the bio-link list for an account.
///
/// Prefers the structured `bio_links` list from the side-channel map, falls
/// back to a synthesized single entry from the plain external-link attribute,
/// else yields an empty list.
pub fn bio_links(profile: &ProfileRecord) -> Value {
    if let Some(links) = profile.node.get("bio_links").and_then(|v| v.as_array()) {
        if !links.is_empty() {
            return Value::Array(links.clone());
        }
    }
    match profile.external_url {
        Some(ref url) if !url.is_empty() => json!([{"title": "External Link", "url": url}]),
        _ => json!([]),
    }
}
