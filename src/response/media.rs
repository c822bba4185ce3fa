//! Media-mode envelope: one post plus its author, labeled per the template.

use crate::core::utils::format_thousands;
use crate::fetch::record::{MediaRecord, ProfileRecord};
use crate::normalize::post::{MediaKind, NormalizedPost};
use crate::response::labels::LabelSet;
use crate::response::{bio_links, SearchMeta};
use serde_json::{json, Map, Value};

/// Slot text when a post carries no music attribution.
const NO_MUSIC_NOTE: &str = "No music metadata found (or Image Post).";

/// Author data for the media-mode envelope.
///
/// Full profile data when the owner was fetchable; the degraded minimal form
/// when the owner fetch failed (private account, upstream hiccup). A failed
/// author fetch never fails the request.
pub enum AuthorBlock {
    Full(ProfileRecord),
    Hidden { username: String, id: String },
}

/// Assemble the media-mode envelope.
pub fn media_envelope(
    record: &MediaRecord,
    post: &NormalizedPost,
    author: &AuthorBlock,
    labels: &LabelSet,
    meta: &SearchMeta,
) -> Value {
    let mut envelope = Map::new();
    envelope.insert("search_metadata".into(), meta.to_value(None));
    envelope.insert("type".into(), json!("media"));
    envelope.insert("author_details".into(), author_details(author, labels));
    envelope.insert(
        "bio_links".into(),
        match author {
            AuthorBlock::Full(profile) => bio_links(profile),
            AuthorBlock::Hidden { .. } => json!([]),
        },
    );
    envelope.insert(
        "audio".into(),
        match post.music {
            Some(ref music) => serde_json::to_value(music).unwrap_or(Value::Null),
            None => json!(NO_MUSIC_NOTE),
        },
    );
    envelope.insert("media_specs".into(), media_specs(record, post, labels));
    envelope.insert("engagement".into(), engagement(post, labels));
    envelope.insert(
        "tagged_users".into(),
        serde_json::to_value(&post.tagged_users).unwrap_or_else(|_| json!([])),
    );
    envelope.insert("caption".into(), json!(post.caption));
    envelope.insert("downloads".into(), downloads(post, labels));
    if !post.carousel_items.is_empty() {
        envelope.insert(
            "carousel_items".into(),
            serde_json::to_value(&post.carousel_items).unwrap_or_else(|_| json!([])),
        );
    }
    Value::Object(envelope)
}

fn author_details(author: &AuthorBlock, labels: &LabelSet) -> Value {
    match author {
        AuthorBlock::Full(profile) => {
            let mut block = Map::new();
            block.insert(labels.username.into(), json!(format!("@{}", profile.username)));
            block.insert(labels.full_name.into(), json!(profile.full_name));
            block.insert(labels.user_id.into(), json!(profile.user_id));
            block.insert(labels.verified.into(), json!(profile.is_verified));
            block.insert(labels.business.into(), json!(profile.is_business));
            block.insert(labels.followers.into(), json!(format_thousands(profile.followers)));
            block.insert(labels.following.into(), json!(format_thousands(profile.following)));
            block.insert(labels.total_posts.into(), json!(format_thousands(profile.media_count)));
            block.insert(
                labels.bio.into(),
                json!(if profile.biography.is_empty() {
                    "Empty"
                } else {
                    profile.biography.as_str()
                }),
            );
            block.insert(labels.avatar.into(), json!(profile.profile_pic_url_hd));
            Value::Object(block)
        }
        AuthorBlock::Hidden { username, id } => json!({
            "username": username,
            "id": id,
            "note": "hidden"
        }),
    }
}

fn media_specs(record: &MediaRecord, post: &NormalizedPost, labels: &LabelSet) -> Value {
    let mut block = Map::new();
    block.insert(
        labels.media_type.into(),
        serde_json::to_value(post.kind).unwrap_or(Value::Null),
    );
    block.insert(labels.dimensions.into(), json!(format!("{} x {}", post.width, post.height)));
    block.insert(
        labels.duration.into(),
        match record.video_duration {
            Some(secs) => json!(format!("{} sec", secs)),
            None => json!("N/A"),
        },
    );
    block.insert(labels.upload_date.into(), json!(post.iso_date));
    block.insert(labels.shortcode.into(), json!(post.id));
    Value::Object(block)
}

fn engagement(post: &NormalizedPost, labels: &LabelSet) -> Value {
    let mut block = Map::new();
    block.insert(
        labels.views.into(),
        match post.views {
            Some(views) if views > 0 => json!(format_thousands(views)),
            _ => json!("N/A"),
        },
    );
    block.insert(labels.likes.into(), json!(format_thousands(post.likes)));
    block.insert(labels.comments.into(), json!(format_thousands(post.comments)));
    Value::Object(block)
}

/// Thumbnail always; exactly one of the video/image URL keys, matching the
/// media type. Never both, never a null value.
fn downloads(post: &NormalizedPost, labels: &LabelSet) -> Value {
    let mut block = Map::new();
    block.insert(labels.thumbnail.into(), json!(post.thumbnail));
    if post.kind == MediaKind::Reel {
        block.insert(labels.video_url.into(), json!(post.link));
    } else {
        block.insert(labels.image_url.into(), json!(post.link));
    }
    Value::Object(block)
}
