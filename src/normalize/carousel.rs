//! Carousel (sidecar) sub-extractor.

use crate::fetch::record::MediaRecord;
use serde::Serialize;

/// Per-item dimensions are not exposed on the provider's sidecar edges, so
/// every item carries these placeholders. A known provider limitation,
/// reproduced rather than papered over with derived values.
const PLACEHOLDER_WIDTH: u64 = 1080;
const PLACEHOLDER_HEIGHT: u64 = 1350;

/// One item inside a multi-item (sidecar) post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselItem {
    pub position: u32,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub link: String,
    pub width: u64,
    pub height: u64,
}

/// Walk the sidecar edge list in order, 1-indexed.
///
/// Items are classified video/image by their own flag and linked to their own
/// media URL. An item without a shortcode gets a synthesized
/// `{parent_shortcode}_{index}` id.
pub fn extract_carousel(record: &MediaRecord) -> Vec<CarouselItem> {
    record
        .node
        .pointer("/edge_sidecar_to_children/edges")
        .and_then(|v| v.as_array())
        .map(|edges| {
            edges
                .iter()
                .enumerate()
                .filter_map(|(i, edge)| {
                    let node = edge.get("node")?;
                    let position = (i + 1) as u32;
                    let is_video = node.get("is_video").and_then(|v| v.as_bool()).unwrap_or(false);
                    let link = if is_video {
                        node.get("video_url")
                    } else {
                        node.get("display_url")
                    }
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string();
                    let id = node
                        .get("shortcode")
                        .and_then(|v| v.as_str())
                        .map(String::from)
                        .unwrap_or_else(|| format!("{}_{}", record.shortcode, position));

                    Some(CarouselItem {
                        position,
                        id,
                        kind: if is_video { "video" } else { "image" }.to_string(),
                        link,
                        width: PLACEHOLDER_WIDTH,
                        height: PLACEHOLDER_HEIGHT,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(node: serde_json::Value) -> MediaRecord {
        MediaRecord::from_node(node).expect("test node should parse")
    }

    #[test]
    fn test_items_in_order_with_synthesized_ids() {
        let record = record(json!({
            "shortcode": "PARENT",
            "__typename": "GraphSidecar",
            "edge_sidecar_to_children": {
                "edges": [
                    {"node": {"is_video": false, "display_url": "https://cdn.example/1.jpg"}},
                    {"node": {"is_video": true, "video_url": "https://cdn.example/2.mp4", "shortcode": "OWN_CODE"}}
                ]
            }
        }));
        let items = extract_carousel(&record);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].position, 1);
        assert_eq!(items[0].id, "PARENT_1");
        assert_eq!(items[0].kind, "image");
        assert_eq!(items[0].link, "https://cdn.example/1.jpg");

        assert_eq!(items[1].position, 2);
        assert_eq!(items[1].id, "OWN_CODE");
        assert_eq!(items[1].kind, "video");
        assert_eq!(items[1].link, "https://cdn.example/2.mp4");
    }

    #[test]
    fn test_placeholder_dimensions() {
        let record = record(json!({
            "shortcode": "P",
            "edge_sidecar_to_children": {
                "edges": [{"node": {"is_video": false, "display_url": "https://cdn.example/1.jpg"}}]
            }
        }));
        let items = extract_carousel(&record);
        assert_eq!(items[0].width, 1080);
        assert_eq!(items[0].height, 1350);
    }

    #[test]
    fn test_no_sidecar_edges() {
        assert!(extract_carousel(&record(json!({"shortcode": "P"}))).is_empty());
    }
}
