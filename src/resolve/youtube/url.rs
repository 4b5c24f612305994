//! YouTube link handling: playlist detection and canonical watch URLs.

use std::sync::LazyLock;

use regex::Regex;

/// Prefix of every canonical video link.
pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

static LIST_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]list=([A-Za-z0-9_-]+)").unwrap());
static SHORT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]+)").unwrap());
static WATCH_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtube\.com/watch\?(?:[^#]*&)?v=([A-Za-z0-9_-]+)").unwrap());
static PATH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtube\.com/(?:shorts|embed|live)/([A-Za-z0-9_-]+)").unwrap());

/// Canonical link for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL}{video_id}")
}

/// The `list=` parameter of a link, if any.
pub fn playlist_id(url: &str) -> Option<&str> {
    LIST_PARAM
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// The video id of a short link, watch link, or shorts/embed/live link.
pub fn video_id(url: &str) -> Option<&str> {
    [&*SHORT_LINK, &*WATCH_PARAM, &*PATH_ID]
        .into_iter()
        .find_map(|re| re.captures(url))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Rewrite any single-video link to `https://www.youtube.com/watch?v=<id>`,
/// dropping every other parameter.
pub fn canonical_watch_url(url: &str) -> Option<String> {
    video_id(url).map(watch_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link() {
        assert_eq!(
            canonical_watch_url("https://youtu.be/abc123?x=1").as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );
    }

    #[test]
    fn test_watch_link_drops_parameters() {
        assert_eq!(
            canonical_watch_url("https://www.youtube.com/watch?v=abc-_9&t=42s").as_deref(),
            Some("https://www.youtube.com/watch?v=abc-_9")
        );
        assert_eq!(
            canonical_watch_url("youtube.com/watch?feature=share&v=xyz").as_deref(),
            Some("https://www.youtube.com/watch?v=xyz")
        );
    }

    #[test]
    fn test_path_links() {
        assert_eq!(video_id("https://www.youtube.com/shorts/s1"), Some("s1"));
        assert_eq!(video_id("https://youtube.com/embed/e1?autoplay=1"), Some("e1"));
    }

    #[test]
    fn test_no_video_id() {
        assert_eq!(video_id("https://www.youtube.com/channel/UC123"), None);
        assert_eq!(video_id("https://www.youtube.com/watch?vv=nope"), None);
    }

    #[test]
    fn test_playlist_id() {
        assert_eq!(
            playlist_id("https://www.youtube.com/playlist?list=PLabc_1"),
            Some("PLabc_1")
        );
        assert_eq!(
            playlist_id("https://www.youtube.com/watch?v=x&list=RDx&index=2"),
            Some("RDx")
        );
        assert_eq!(playlist_id("https://youtu.be/x?si=list"), None);
        assert_eq!(playlist_id("https://www.youtube.com/watch?v=x&playlist=y"), None);
    }
}
