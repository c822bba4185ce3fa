//! Tagged-user sub-extractor.

use crate::fetch::record::MediaRecord;
use serde::Serialize;

/// One user tagged in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedUser {
    pub username: String,
    pub name: String,
    pub is_verified: bool,
}

/// Extract tagged users, preserving source order.
///
/// Primary path: the `edge_media_to_tagged_user` edge list in the
/// side-channel map. Fallback path, used only when the primary path yields
/// nothing: the record's flattened tagged-user list, skipping any entry that
/// is a bare string instead of a user object (the provider emits both). The
/// two sources are never merged.
pub fn extract_tagged(record: &MediaRecord) -> Vec<TaggedUser> {
    let primary: Vec<TaggedUser> = record
        .node
        .pointer("/edge_media_to_tagged_user/edges")
        .and_then(|v| v.as_array())
        .map(|edges| {
            edges
                .iter()
                .filter_map(|edge| {
                    let user = edge.pointer("/node/user")?;
                    Some(TaggedUser {
                        username: user.get("username").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                        name: user.get("full_name").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                        is_verified: user.get("is_verified").and_then(|v| v.as_bool()).unwrap_or(false),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if !primary.is_empty() {
        return primary;
    }

    record
        .tagged_users
        .iter()
        .filter_map(|entry| {
            // bare-string entries carry no name/verification data; skip them
            let user = entry.as_object()?;
            Some(TaggedUser {
                username: user.get("username").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                name: user.get("full_name").and_then(|v| v.as_str()).unwrap_or("").to_string(),
                is_verified: user.get("is_verified").and_then(|v| v.as_bool()).unwrap_or(false),
            })
        })
        .collect()
}
