//! Test utilities and fixtures for jukebox-resolver tests.
//!
//! This module provides common test helpers and factories for the extraction
//! tool's documents and for resolved tracks, to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use jukebox_resolver::test_utils::{info_json, mock_track};
//!
//! let doc = info_json("https://soundcloud.com/a/b", "Song");
//! let track = mock_track("Song");
//! ```

use crate::resolve::Track;
use crate::resolve::extractor::dto::InfoJson;
use crate::resolve::provider::Provider;

/// Creates a leaf document with a URL and a title.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let doc = InfoJson {
///     uploader: Some("Someone".to_string()),
///     ..info_json("https://example.com/x", "X")
/// };
/// ```
pub fn info_json(url: &str, title: &str) -> InfoJson {
    InfoJson {
        kind: Some("video".to_string()),
        webpage_url: Some(url.to_string()),
        title: Some(title.to_string()),
        ..Default::default()
    }
}

/// Creates a playlist container document.
pub fn playlist_json(url: &str) -> InfoJson {
    InfoJson {
        kind: Some("playlist".to_string()),
        webpage_url: Some(url.to_string()),
        title: Some("A Playlist".to_string()),
        ..Default::default()
    }
}

/// Creates a YouTube track with the given title and sensible defaults.
pub fn mock_track(title: &str) -> Track {
    Track {
        title: Some(title.to_string()),
        artist: Some("Test Channel".to_string()),
        duration: 180,
        ..Track::new(
            format!("https://www.youtube.com/watch?v={}", title.replace(' ', "_")),
            Provider::YouTube,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_json_defaults() {
        let doc = info_json("https://example.com/a", "A");
        assert!(!doc.is_playlist());
        assert_eq!(doc.url(), Some("https://example.com/a"));
        assert_eq!(doc.title.as_deref(), Some("A"));
    }

    #[test]
    fn test_playlist_json() {
        assert!(playlist_json("https://example.com/p").is_playlist());
    }

    #[test]
    fn test_mock_track_defaults() {
        let track = mock_track("Some Song");
        assert_eq!(track.url, "https://www.youtube.com/watch?v=Some_Song");
        assert_eq!(track.source, "youtube");
        assert_eq!(track.duration, 180);
        assert!(!track.blacklisted);
    }
}
