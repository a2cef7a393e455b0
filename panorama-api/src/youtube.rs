use chrono::{DateTime, Utc};

/// One recent upload, flattened from the YouTube search response. The
/// server merges uploads across channels and sorts them newest-first.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Video {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
    #[serde(default, rename = "thumbnailURL")]
    pub thumbnail_url: Option<String>,
}
