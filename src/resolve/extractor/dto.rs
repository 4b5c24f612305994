//! Extraction tool `.info.json` Data Transfer Objects
//!
//! Only the fields we read are declared; the tool writes many more and
//! serde ignores them. DO NOT use these types outside the resolve module -
//! convert them to [`Track`](crate::resolve::Track) with the adapter.
//!
//! Example document (abridged):
//! ```json
//! {
//!   "_type": "video",
//!   "id": "dQw4w9WgXcQ",
//!   "title": "Never Gonna Give You Up",
//!   "uploader": "Rick Astley",
//!   "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
//!   "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
//!   "duration": 212
//! }
//! ```

use serde::{Deserialize, Serialize};

/// `_type` value marking a playlist container document.
pub const PLAYLIST_TYPE: &str = "playlist";

/// One leaf media entry written by the extraction tool.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InfoJson {
    /// `video` for leaf entries, `playlist` for containers
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    /// Canonical page of the item
    pub webpage_url: Option<String>,
    /// The URL the tool was given (used when `webpage_url` is missing)
    pub original_url: Option<String>,
    pub title: Option<String>,
    /// Track name from music metadata, when the site provides it
    pub track: Option<String>,
    pub artist: Option<String>,
    pub uploader: Option<String>,
    pub album: Option<String>,
    pub thumbnail: Option<String>,
    /// Seconds, as a number or a string depending on the extractor
    pub duration: Option<serde_json::Value>,
}

impl InfoJson {
    /// Whether this document describes a playlist rather than a media item.
    pub fn is_playlist(&self) -> bool {
        self.kind.as_deref() == Some(PLAYLIST_TYPE)
    }

    /// Best link to the item: `webpage_url`, then `original_url`.
    pub fn url(&self) -> Option<&str> {
        [&self.webpage_url, &self.original_url]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTO matches what the extraction tool writes.
// ============================================================================
