pub mod defaults;

use serde::{Deserialize, Serialize};

/// A recorded sermon
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Sermon {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub preacher: String,
    pub scripture: String,
    /// Civil date, YYYY-MM-DD
    pub date: String,
    /// Pasted share link; normalized to an embeddable form on render
    pub video_url: String,
}

/// A weekly bulletin
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Bulletin {
    pub id: String,
    pub title: String,
    pub date: String,
    pub file_url: String,
}

/// A church notice
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Notice {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_en: Option<String>,
    pub date: String,
    #[serde(default)]
    pub pinned: bool,
}

/// A photo or video in the gallery
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub date: String,
    pub media_url: String,
}

/// A pastoral column
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub author: String,
    pub body: String,
    pub date: String,
}

/// A daily devotional entry
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Devotional {
    pub id: String,
    pub date: String,
    pub scripture: String,
    pub body: String,
    pub author: String,
}
