//! Profile-mode envelope: account attributes plus a bounded slice of
//! normalized recent posts.

use crate::fetch::record::{MediaRecord, ProfileRecord};
use crate::normalize::post::{NormalizedPost, PostNormalizer};
use crate::response::{bio_links, SearchMeta};
use serde_json::{json, Value};

/// Normalize the account's recent post nodes, 1-indexed, capped at `cap`.
///
/// A node that fails record construction (no shortcode) is skipped with a
/// warning instead of aborting the whole listing.
pub fn recent_posts(profile: &ProfileRecord, normalizer: &PostNormalizer, cap: usize) -> Vec<NormalizedPost> {
    profile
        .post_nodes
        .iter()
        .take(cap)
        .enumerate()
        .filter_map(|(i, node)| {
            let record = match MediaRecord::from_node(node.clone()) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Skipping malformed post node for @{}: {}", profile.username, e);
                    return None;
                }
            };
            Some(normalizer.normalize(&record, Some((i + 1) as u32)))
        })
        .collect()
}

/// Assemble the profile-mode envelope.
pub fn profile_envelope(profile: &ProfileRecord, posts: &[NormalizedPost], meta: &SearchMeta) -> Value {
    let request_url = format!("https://www.instagram.com/{}", profile.username);
    json!({
        "search_metadata": meta.to_value(Some(&request_url)),
        "search_parameters": {
            "engine": "instagram_profile",
            "username": profile.username
        },
        "profile": {
            "username": profile.username,
            "name": profile.full_name,
            "avatar": profile.profile_pic_url,
            "avatar_hd": profile.profile_pic_url_hd,
            "is_verified": profile.is_verified,
            "is_business": profile.is_business,
            "posts": profile.media_count,
            "followers": profile.followers,
            "following": profile.following,
            "external_link": profile.external_url,
            "bio_links": bio_links(profile),
            "bio": profile.biography
        },
        "posts": posts
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizerConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn profile_with_posts(count: usize) -> ProfileRecord {
        let edges: Vec<Value> = (0..count)
            .map(|i| {
                json!({"node": {
                    "shortcode": format!("POST{}", i),
                    "display_url": format!("https://cdn.example/{}.jpg", i),
                    "taken_at_timestamp": 1700000000 + i as i64
                }})
            })
            .collect();
        ProfileRecord::from_node(json!({
            "username": "nasa",
            "full_name": "NASA",
            "id": "528817151",
            "edge_owner_to_timeline_media": {"count": count, "edges": edges}
        }))
        .unwrap()
    }

    fn meta() -> SearchMeta {
        SearchMeta {
            id: "search_1700000000".into(),
            created_at: Some("2023-11-14T22:13:20Z".into()),
            elapsed_secs: 1.2,
        }
    }

    #[test]
    fn test_posts_capped_and_positioned() {
        let profile = profile_with_posts(12);
        let normalizer = PostNormalizer::new(NormalizerConfig::default());
        let posts = recent_posts(&profile, &normalizer, 8);

        assert_eq!(posts.len(), 8);
        assert_eq!(posts[0].position, Some(1));
        assert_eq!(posts[7].position, Some(8));
        assert_eq!(posts[0].id, "POST0");
    }

    #[test]
    fn test_malformed_nodes_skipped() {
        let mut profile = profile_with_posts(2);
        profile.post_nodes.insert(1, json!({"is_video": false}));
        let normalizer = PostNormalizer::new(NormalizerConfig::default());
        let posts = recent_posts(&profile, &normalizer, 8);

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "POST0");
        assert_eq!(posts[1].id, "POST1");
    }

    #[test]
    fn test_envelope_shape() {
        let profile = profile_with_posts(2);
        let normalizer = PostNormalizer::new(NormalizerConfig::default());
        let posts = recent_posts(&profile, &normalizer, 8);
        let envelope = profile_envelope(&profile, &posts, &meta());

        assert_eq!(envelope["search_parameters"]["engine"], json!("instagram_profile"));
        assert_eq!(
            envelope["search_metadata"]["request_url"],
            json!("https://www.instagram.com/nasa")
        );
        assert_eq!(envelope["profile"]["username"], json!("nasa"));
        assert_eq!(envelope["posts"].as_array().unwrap().len(), 2);
        // Positions survive serialization
        assert_eq!(envelope["posts"][0]["position"], json!(1));
    }
}
