//! Music attribution sub-extractor.

use crate::fetch::record::MediaRecord;
use serde::Serialize;
use serde_json::Value;

/// Music attribution for a reel, when the provider exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicInfo {
    pub artist_name: String,
    pub song_name: String,
    pub uses_original_audio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_id: Option<String>,
}

/// Read `clips_music_attribution_info` from the side-channel map.
///
/// Absent or null attribution means "no music" — represented as `None`, not
/// as an error; the normalizer then omits the `music` key entirely.
pub fn extract_music(record: &MediaRecord) -> Option<MusicInfo> {
    let info = record.node.get("clips_music_attribution_info")?;
    if info.is_null() {
        return None;
    }

    Some(MusicInfo {
        artist_name: info
            .get("artist_name")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown")
            .to_string(),
        song_name: info
            .get("song_name")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown")
            .to_string(),
        uses_original_audio: info
            .get("uses_original_audio")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        // audio_id arrives as string or number depending on endpoint
        audio_id: info.get("audio_id").and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }),
    })
}
