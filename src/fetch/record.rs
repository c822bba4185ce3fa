//! Read-only records produced by the fetch layer.
//!
//! A record exposes the handful of attributes the normalization core works
//! with by name, plus the raw provider node as a side-channel map for the
//! fields that were never promoted to named attributes (`dimensions`,
//! `clips_music_attribution_info`, `edge_media_to_tagged_user`, `play_count`,
//! `bio_links`, ...). Records are constructed once per request and never
//! mutated afterwards.

use crate::core::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Stringify a provider id that arrives either as a JSON string or a number.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One post or reel, as fetched from the upstream GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct MediaRecord {
    pub shortcode: String,
    pub typename: String,
    /// Display/image URL — always present as a thumbnail, even for videos
    pub display_url: String,
    pub video_url: Option<String>,
    pub is_video: bool,
    /// Directly-exposed dimensions; 0 when the provider only ships the
    /// nested `dimensions` map (see the normalizer's fallback chain)
    pub width: u64,
    pub height: u64,
    pub video_view_count: Option<u64>,
    pub caption: Option<String>,
    pub likes: u64,
    pub comments: u64,
    /// Upload instant (provider timestamps are UTC)
    pub taken_at: DateTime<Utc>,
    pub video_duration: Option<f64>,
    pub owner_username: String,
    pub owner_id: String,
    /// Flattened tagged-user list some provider responses carry alongside
    /// the edge list. Entries are kept raw because the provider sometimes
    /// emits bare username strings instead of user objects.
    pub tagged_users: Vec<Value>,
    /// Side-channel map: the full raw provider node
    pub node: Value,
}

impl MediaRecord {
    /// Build a record from a raw GraphQL media node.
    ///
    /// Fails only when the node has no shortcode — every other missing field
    /// degrades to a default and is resolvable later through the side-channel
    /// map.
    pub fn from_node(node: Value) -> AppResult<Self> {
        let shortcode = node
            .get("shortcode")
            .or_else(|| node.get("code"))
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or(AppError::MalformedRecord("shortcode"))?;

        let typename = node
            .get("__typename")
            .and_then(|v| v.as_str())
            .unwrap_or("GraphImage")
            .to_string();

        let display_url = node
            .get("display_url")
            .or_else(|| node.get("thumbnail_src"))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let taken_at = node
            .get("taken_at_timestamp")
            .or_else(|| node.get("taken_at"))
            .and_then(|v| v.as_i64())
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .unwrap_or(DateTime::UNIX_EPOCH);

        let caption = node
            .pointer("/edge_media_to_caption/edges/0/node/text")
            .and_then(|v| v.as_str())
            .map(String::from);

        let likes = node
            .pointer("/edge_media_preview_like/count")
            .or_else(|| node.pointer("/edge_liked_by/count"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let comments = node
            .pointer("/edge_media_to_comment/count")
            .or_else(|| node.pointer("/edge_media_to_parent_comment/count"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let tagged_users = node
            .pointer("/usertags/in")
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| entry.get("user").cloned().unwrap_or_else(|| entry.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            shortcode,
            typename,
            display_url,
            video_url: node.get("video_url").and_then(|v| v.as_str()).map(String::from),
            is_video: node.get("is_video").and_then(|v| v.as_bool()).unwrap_or(false),
            width: node.get("width").and_then(|v| v.as_u64()).unwrap_or(0),
            height: node.get("height").and_then(|v| v.as_u64()).unwrap_or(0),
            video_view_count: node.get("video_view_count").and_then(|v| v.as_u64()),
            caption,
            likes,
            comments,
            taken_at,
            video_duration: node.get("video_duration").and_then(|v| v.as_f64()),
            owner_username: node
                .pointer("/owner/username")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            owner_id: node.pointer("/owner/id").and_then(id_string).unwrap_or_default(),
            tagged_users,
            node,
        })
    }
}

/// One account, as fetched from the upstream profile endpoints.
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub username: String,
    pub full_name: String,
    pub user_id: String,
    pub is_verified: bool,
    pub is_business: bool,
    pub is_private: bool,
    pub media_count: u64,
    pub followers: u64,
    pub following: u64,
    pub biography: String,
    pub external_url: Option<String>,
    pub profile_pic_url: String,
    pub profile_pic_url_hd: String,
    /// Raw nodes of the account's most recent posts, in timeline order
    pub post_nodes: Vec<Value>,
    /// Side-channel map: the full raw provider user node
    pub node: Value,
}

impl ProfileRecord {
    /// Build a record from a raw user node (GraphQL `data.user` shape or the
    /// REST `user` shape — counter fields differ, both are tried).
    pub fn from_node(node: Value) -> AppResult<Self> {
        let username = node
            .get("username")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or(AppError::MalformedRecord("username"))?;

        let media_count = node
            .pointer("/edge_owner_to_timeline_media/count")
            .or_else(|| node.get("media_count"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let followers = node
            .pointer("/edge_followed_by/count")
            .or_else(|| node.get("follower_count"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let following = node
            .pointer("/edge_follow/count")
            .or_else(|| node.get("following_count"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let post_nodes = node
            .pointer("/edge_owner_to_timeline_media/edges")
            .and_then(|v| v.as_array())
            .map(|edges| edges.iter().filter_map(|edge| edge.get("node").cloned()).collect())
            .unwrap_or_default();

        let profile_pic_url = node
            .get("profile_pic_url")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let profile_pic_url_hd = node
            .get("profile_pic_url_hd")
            .and_then(|v| v.as_str())
            .unwrap_or(&profile_pic_url)
            .to_string();

        Ok(Self {
            username,
            full_name: node.get("full_name").and_then(|v| v.as_str()).unwrap_or("").to_string(),
            user_id: node
                .get("id")
                .or_else(|| node.get("pk"))
                .and_then(id_string)
                .unwrap_or_default(),
            is_verified: node.get("is_verified").and_then(|v| v.as_bool()).unwrap_or(false),
            is_business: node
                .get("is_business_account")
                .or_else(|| node.get("is_business"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            is_private: node.get("is_private").and_then(|v| v.as_bool()).unwrap_or(false),
            media_count,
            followers,
            following,
            biography: node.get("biography").and_then(|v| v.as_str()).unwrap_or("").to_string(),
            external_url: node.get("external_url").and_then(|v| v.as_str()).map(String::from),
            profile_pic_url,
            profile_pic_url_hd,
            post_nodes,
            node,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_record_requires_shortcode() {
        let err = MediaRecord::from_node(json!({"is_video": false})).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord("shortcode")));
    }

    #[test]
    fn test_media_record_from_graphql_node() {
        let record = MediaRecord::from_node(json!({
            "shortcode": "ABC123",
            "__typename": "GraphVideo",
            "display_url": "https://cdn.example/display.jpg",
            "video_url": "https://cdn.example/video.mp4",
            "is_video": true,
            "taken_at_timestamp": 1700000000,
            "video_view_count": 5000,
            "edge_media_to_caption": {"edges": [{"node": {"text": "hello"}}]},
            "edge_media_preview_like": {"count": 42},
            "edge_media_to_comment": {"count": 7},
            "owner": {"username": "nasa", "id": 528817151}
        }))
        .unwrap();

        assert_eq!(record.shortcode, "ABC123");
        assert_eq!(record.typename, "GraphVideo");
        assert!(record.is_video);
        assert_eq!(record.video_view_count, Some(5000));
        assert_eq!(record.caption.as_deref(), Some("hello"));
        assert_eq!(record.likes, 42);
        assert_eq!(record.comments, 7);
        assert_eq!(record.owner_id, "528817151");
        assert_eq!(record.taken_at.timestamp(), 1700000000);
    }

    #[test]
    fn test_media_record_accepts_rest_code_field() {
        let record = MediaRecord::from_node(json!({"code": "XYZ789", "taken_at": 1700000000})).unwrap();
        assert_eq!(record.shortcode, "XYZ789");
        assert_eq!(record.typename, "GraphImage");
        assert!(!record.is_video);
    }

    #[test]
    fn test_profile_record_counts_from_either_shape() {
        let graphql = ProfileRecord::from_node(json!({
            "username": "nasa",
            "id": "528817151",
            "edge_followed_by": {"count": 96000000},
            "edge_owner_to_timeline_media": {"count": 4000, "edges": []}
        }))
        .unwrap();
        assert_eq!(graphql.followers, 96000000);
        assert_eq!(graphql.media_count, 4000);

        let rest = ProfileRecord::from_node(json!({
            "username": "nasa",
            "pk": 528817151,
            "follower_count": 96000000,
            "media_count": 4000
        }))
        .unwrap();
        assert_eq!(rest.followers, 96000000);
        assert_eq!(rest.user_id, "528817151");
    }

    #[test]
    fn test_profile_record_requires_username() {
        let err = ProfileRecord::from_node(json!({"id": "1"})).unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord("username")));
    }
}
