//! Field normalizer: one `MediaRecord` in, one `NormalizedPost` out.

use crate::fetch::record::MediaRecord;
use crate::normalize::carousel::{extract_carousel, CarouselItem};
use crate::normalize::music::{extract_music, MusicInfo};
use crate::normalize::tagged::{extract_tagged, TaggedUser};
use crate::normalize::{DateOffset, NormalizerConfig, ViewsPolicy};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Three-way media classification.
///
/// Provider typenames are mapped down to this tag; anything unrecognized is
/// treated as a plain image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Reel,
    Carousel,
}

impl MediaKind {
    /// Map a provider type tag onto the output vocabulary.
    pub fn classify(typename: &str) -> Self {
        match typename {
            "GraphVideo" | "XDTGraphVideo" => MediaKind::Reel,
            "GraphSidecar" | "XDTGraphSidecar" => MediaKind::Carousel,
            _ => MediaKind::Image,
        }
    }
}

/// Stable output schema for one post.
///
/// Field order is the serialized key order. Optional keys are omitted, never
/// emitted as null; serialization of the same input is byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    pub id: String,
    pub permalink: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub link: String,
    pub width: u64,
    pub height: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    pub caption: String,
    pub likes: u64,
    pub comments: u64,
    pub iso_date: String,
    pub thumbnail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music: Option<MusicInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_audio: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tagged_users: Vec<TaggedUser>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub carousel_items: Vec<CarouselItem>,
}

/// Configurable field normalizer.
///
/// Holds only policy flags; `normalize` is a pure function of the record and
/// the flags.
#[derive(Debug, Clone, Copy)]
pub struct PostNormalizer {
    config: NormalizerConfig,
}

impl PostNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalize one record. `position` is the caller-supplied 1-based slot
    /// in a profile listing; zero or absent means the key is omitted.
    pub fn normalize(&self, record: &MediaRecord, position: Option<u32>) -> NormalizedPost {
        let kind = MediaKind::classify(&record.typename);

        // View count fallback chain: named attribute, then the side-channel
        // fields the provider moves it between.
        let resolved_views = record
            .video_view_count
            .or_else(|| record.node.get("video_view_count").and_then(|v| v.as_u64()))
            .or_else(|| record.node.get("play_count").and_then(|v| v.as_u64()));
        let views = match self.config.views {
            ViewsPolicy::OmitWhenUnknown => resolved_views.filter(|v| *v > 0),
            ViewsPolicy::ZeroWhenUnknown => Some(resolved_views.unwrap_or(0)),
        };

        // Dimension fallback: direct attributes, else the nested dimensions map.
        let (width, height) = if record.width == 0 {
            let dims = record.node.get("dimensions");
            (
                dims.and_then(|d| d.get("width")).and_then(|v| v.as_u64()).unwrap_or(0),
                dims.and_then(|d| d.get("height")).and_then(|v| v.as_u64()).unwrap_or(0),
            )
        } else {
            (record.width, record.height)
        };

        let link = if record.is_video {
            record.video_url.clone().unwrap_or_else(|| record.display_url.clone())
        } else {
            record.display_url.clone()
        };

        let music = extract_music(record);
        let has_audio = music.as_ref().map(|_| true);

        let carousel_items = if kind == MediaKind::Carousel {
            extract_carousel(record)
        } else {
            Vec::new()
        };

        NormalizedPost {
            position: position.filter(|p| *p > 0),
            id: record.shortcode.clone(),
            permalink: format!("https://www.instagram.com/p/{}/", record.shortcode),
            kind,
            link,
            width,
            height,
            views,
            caption: record.caption.clone().unwrap_or_default(),
            likes: record.likes,
            comments: record.comments,
            iso_date: self.format_date(record.taken_at),
            thumbnail: record.display_url.clone(),
            music,
            has_audio,
            tagged_users: extract_tagged(record),
            carousel_items,
        }
    }

    /// Render the upload instant per the configured offset mode.
    fn format_date(&self, instant: DateTime<Utc>) -> String {
        match self.config.date_offset {
            DateOffset::Utc => instant.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            DateOffset::Ist => (instant + Duration::minutes(330))
                .format("%Y-%m-%d %H:%M:%S+05:30")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizerConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(node: serde_json::Value) -> MediaRecord {
        MediaRecord::from_node(node).expect("test node should parse")
    }

    fn normalizer() -> PostNormalizer {
        PostNormalizer::new(NormalizerConfig::default())
    }

    #[test]
    fn test_classification() {
        assert_eq!(MediaKind::classify("GraphImage"), MediaKind::Image);
        assert_eq!(MediaKind::classify("GraphVideo"), MediaKind::Reel);
        assert_eq!(MediaKind::classify("XDTGraphSidecar"), MediaKind::Carousel);
        // Unknown provider tags degrade to image
        assert_eq!(MediaKind::classify("GraphHologram"), MediaKind::Image);
    }

    #[test]
    fn test_dimension_fallback_from_side_channel() {
        let record = record(json!({
            "shortcode": "A1",
            "is_video": false,
            "taken_at_timestamp": 1700000000,
            "dimensions": {"width": 1080, "height": 1350}
        }));
        let post = normalizer().normalize(&record, None);
        assert_eq!(post.width, 1080);
        assert_eq!(post.height, 1350);
    }

    #[test]
    fn test_direct_dimensions_win() {
        let record = record(json!({
            "shortcode": "A1",
            "width": 640,
            "height": 800,
            "taken_at_timestamp": 1700000000,
            "dimensions": {"width": 1080, "height": 1350}
        }));
        let post = normalizer().normalize(&record, None);
        assert_eq!(post.width, 640);
        assert_eq!(post.height, 800);
    }

    #[test]
    fn test_views_fallback_chain() {
        let direct = record(json!({"shortcode": "A", "video_view_count": 10, "taken_at_timestamp": 0}));
        assert_eq!(normalizer().normalize(&direct, None).views, Some(10));

        let play_count = record(json!({"shortcode": "A", "play_count": 77, "taken_at_timestamp": 0}));
        assert_eq!(normalizer().normalize(&play_count, None).views, Some(77));
    }

    #[test]
    fn test_views_omitted_when_unknown() {
        let record = record(json!({"shortcode": "A", "taken_at_timestamp": 0}));
        let post = normalizer().normalize(&record, None);
        assert_eq!(post.views, None);
        let rendered = serde_json::to_string(&post).unwrap();
        assert!(!rendered.contains("\"views\""));
    }

    #[test]
    fn test_views_zero_policy_always_emits() {
        let config = NormalizerConfig {
            views: ViewsPolicy::ZeroWhenUnknown,
            ..NormalizerConfig::default()
        };
        let record = record(json!({"shortcode": "A", "taken_at_timestamp": 0}));
        let post = PostNormalizer::new(config).normalize(&record, None);
        assert_eq!(post.views, Some(0));
    }

    #[test]
    fn test_position_elision() {
        let record = record(json!({"shortcode": "A", "taken_at_timestamp": 0}));
        assert_eq!(normalizer().normalize(&record, None).position, None);
        assert_eq!(normalizer().normalize(&record, Some(0)).position, None);
        assert_eq!(normalizer().normalize(&record, Some(3)).position, Some(3));
    }

    #[test]
    fn test_link_selection_for_video() {
        let record = record(json!({
            "shortcode": "V1",
            "__typename": "GraphVideo",
            "is_video": true,
            "display_url": "https://cdn.example/thumb.jpg",
            "video_url": "https://cdn.example/clip.mp4",
            "taken_at_timestamp": 0
        }));
        let post = normalizer().normalize(&record, None);
        assert_eq!(post.link, "https://cdn.example/clip.mp4");
        assert_eq!(post.thumbnail, "https://cdn.example/thumb.jpg");
    }

    #[test]
    fn test_date_formats() {
        let record = record(json!({"shortcode": "A", "taken_at_timestamp": 1700000000}));
        // 2023-11-14 22:13:20 UTC
        assert_eq!(normalizer().normalize(&record, None).iso_date, "2023-11-14T22:13:20Z");

        let ist = PostNormalizer::new(NormalizerConfig {
            date_offset: DateOffset::Ist,
            ..NormalizerConfig::default()
        });
        assert_eq!(ist.normalize(&record, None).iso_date, "2023-11-15 03:43:20+05:30");
    }

    #[test]
    fn test_no_music_means_no_audio_keys() {
        let record = record(json!({
            "shortcode": "V1",
            "__typename": "GraphVideo",
            "is_video": true,
            "taken_at_timestamp": 0
        }));
        let post = normalizer().normalize(&record, None);
        assert_eq!(post.music, None);
        assert_eq!(post.has_audio.unwrap_or(false), false);
        let rendered = serde_json::to_string(&post).unwrap();
        assert!(!rendered.contains("\"music\""));
        assert!(!rendered.contains("\"has_audio\""));
    }

    #[test]
    fn test_carousel_items_only_for_carousels() {
        let sidecar_edges = json!({
            "edges": [
                {"node": {"is_video": false, "display_url": "https://cdn.example/1.jpg"}},
                {"node": {"is_video": true, "video_url": "https://cdn.example/2.mp4"}}
            ]
        });

        let video = record(json!({
            "shortcode": "V1",
            "__typename": "GraphVideo",
            "is_video": true,
            "taken_at_timestamp": 0,
            "edge_sidecar_to_children": sidecar_edges.clone()
        }));
        assert!(normalizer().normalize(&video, None).carousel_items.is_empty());

        let sidecar = record(json!({
            "shortcode": "C1",
            "__typename": "GraphSidecar",
            "taken_at_timestamp": 0,
            "edge_sidecar_to_children": sidecar_edges
        }));
        assert_eq!(normalizer().normalize(&sidecar, None).carousel_items.len(), 2);
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let record = record(json!({
            "shortcode": "D1",
            "__typename": "GraphVideo",
            "is_video": true,
            "video_url": "https://cdn.example/v.mp4",
            "display_url": "https://cdn.example/d.jpg",
            "video_view_count": 123,
            "taken_at_timestamp": 1700000000,
            "clips_music_attribution_info": {"artist_name": "A", "song_name": "S"}
        }));
        let first = serde_json::to_string(&normalizer().normalize(&record, Some(2))).unwrap();
        let second = serde_json::to_string(&normalizer().normalize(&record, Some(2))).unwrap();
        assert_eq!(first, second);
    }
}
