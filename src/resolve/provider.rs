//! Provider catalog.
//!
//! The set of supported sources is closed: each variant carries its URL
//! pattern, an optional query sigil and the extra flags it needs from the
//! extraction tool. [`CATALOG`] fixes the order used for classification.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Build the URL pattern for a provider hosted on `domain`.
///
/// `domain` is a regex fragment, so alternations must already be escaped.
fn domain_pattern(domain: &str) -> Regex {
    Regex::new(&format!(r"^(https?://)?((www\.)?{domain})/.+$"))
        .expect("provider URL pattern is valid")
}

static JAMENDO_URL: LazyLock<Regex> = LazyLock::new(|| domain_pattern(r"jamendo\.com"));
static TWITCH_URL: LazyLock<Regex> = LazyLock::new(|| domain_pattern(r"twitch\.tv"));
static BANDCAMP_URL: LazyLock<Regex> = LazyLock::new(|| domain_pattern(r"(.+\.)?bandcamp\.com"));
static DIRECT_FILE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://)?.*\.(mp3|mp4|ogg|flac|wav|webm)").unwrap());
static SOUNDCLOUD_URL: LazyLock<Regex> = LazyLock::new(|| domain_pattern(r"soundcloud\.com"));
static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| domain_pattern(r"youtube\.com|youtu\.be"));

static SOUNDCLOUD_QUERY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!sc .+$").unwrap());
static YOUTUBE_QUERY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!yt .+$").unwrap());

/// A supported media source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Jamendo,
    Twitch,
    Bandcamp,
    /// A bare link to an audio/video file on any host
    DirectFile,
    SoundCloud,
    /// The only provider backed by an official API
    YouTube,
}

/// Every provider, in classification order.
pub const CATALOG: [Provider; 6] = [
    Provider::Jamendo,
    Provider::Twitch,
    Provider::Bandcamp,
    Provider::DirectFile,
    Provider::SoundCloud,
    Provider::YouTube,
];

impl Provider {
    /// Stable identifier stored in [`Track::source`](super::Track::source).
    pub fn name(self) -> &'static str {
        match self {
            Self::Jamendo => "jamendo",
            Self::Twitch => "twitch",
            Self::Bandcamp => "bandcamp",
            Self::DirectFile => "direct_file",
            Self::SoundCloud => "soundcloud",
            Self::YouTube => "youtube",
        }
    }

    /// Pattern recognizing a direct link to this provider.
    pub fn url_pattern(self) -> &'static Regex {
        match self {
            Self::Jamendo => &JAMENDO_URL,
            Self::Twitch => &TWITCH_URL,
            Self::Bandcamp => &BANDCAMP_URL,
            Self::DirectFile => &DIRECT_FILE_URL,
            Self::SoundCloud => &SOUNDCLOUD_URL,
            Self::YouTube => &YOUTUBE_URL,
        }
    }

    /// Pattern recognizing a free-text query addressed to this provider.
    pub fn query_pattern(self) -> Option<&'static Regex> {
        match self {
            Self::SoundCloud => Some(&SOUNDCLOUD_QUERY),
            Self::YouTube => Some(&YOUTUBE_QUERY),
            _ => None,
        }
    }

    /// The sigil prefixing queries for this provider, including its space.
    pub fn query_sigil(self) -> Option<&'static str> {
        match self {
            Self::SoundCloud => Some("!sc "),
            Self::YouTube => Some("!yt "),
            _ => None,
        }
    }

    /// Remove this provider's query sigil from `input`, if present.
    pub fn strip_sigil(self, input: &str) -> &str {
        self.query_sigil()
            .and_then(|sigil| input.strip_prefix(sigil))
            .unwrap_or(input)
    }

    /// Search prefix understood by the extraction tool for text queries.
    ///
    /// The prefix fixes the number of results to five.
    pub fn search_prefix(self) -> Option<&'static str> {
        match self {
            Self::SoundCloud => Some("scsearch5:"),
            Self::YouTube => Some("ytsearch5:"),
            _ => None,
        }
    }

    /// Extra `--flag value` pairs passed to the extraction tool.
    ///
    /// An empty value means the flag takes no argument.
    pub fn extractor_args(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::YouTube => &[("yes-playlist", "")],
            _ => &[],
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for provider in CATALOG {
            assert_eq!(provider.name().parse::<Provider>().unwrap(), provider);
            assert_eq!(provider.to_string(), provider.name());
        }
        assert!("myspace".parse::<Provider>().is_err());
    }

    #[test]
    fn test_url_patterns() {
        assert!(Provider::Jamendo.url_pattern().is_match("https://www.jamendo.com/track/1"));
        assert!(Provider::Twitch.url_pattern().is_match("twitch.tv/videos/42"));
        assert!(Provider::Bandcamp.url_pattern().is_match("https://artist.bandcamp.com/track/x"));
        assert!(Provider::SoundCloud.url_pattern().is_match("https://soundcloud.com/a/b"));
        assert!(Provider::YouTube.url_pattern().is_match("https://youtu.be/abc123"));
        assert!(Provider::YouTube.url_pattern().is_match("https://www.youtube.com/watch?v=x"));
        assert!(Provider::DirectFile.url_pattern().is_match("http://host.org/music/song.flac"));
    }

    #[test]
    fn test_domain_requires_path() {
        assert!(!Provider::YouTube.url_pattern().is_match("https://youtube.com"));
        assert!(!Provider::YouTube.url_pattern().is_match("https://youtube.com/"));
    }

    #[test]
    fn test_lookalike_domains_rejected() {
        assert!(!Provider::YouTube.url_pattern().is_match("https://notyoutube.com/watch?v=x"));
        assert!(!Provider::Twitch.url_pattern().is_match("https://twitch.tv.evil.org/x"));
    }

    #[test]
    fn test_query_patterns() {
        assert!(Provider::YouTube.query_pattern().unwrap().is_match("!yt daft punk"));
        assert!(Provider::SoundCloud.query_pattern().unwrap().is_match("!sc daft punk"));
        assert!(!Provider::YouTube.query_pattern().unwrap().is_match("!yt "));
        assert!(!Provider::YouTube.query_pattern().unwrap().is_match("!sc daft punk"));
        assert!(Provider::Jamendo.query_pattern().is_none());
    }

    #[test]
    fn test_strip_sigil() {
        assert_eq!(Provider::SoundCloud.strip_sigil("!sc chill beats"), "chill beats");
        assert_eq!(Provider::SoundCloud.strip_sigil("chill beats"), "chill beats");
        assert_eq!(Provider::Twitch.strip_sigil("!sc chill"), "!sc chill");
    }

    #[test]
    fn test_only_youtube_has_extra_args() {
        for provider in CATALOG {
            let args = provider.extractor_args();
            if provider == Provider::YouTube {
                assert_eq!(args, &[("yes-playlist", "")]);
            } else {
                assert!(args.is_empty());
            }
        }
    }

    #[test]
    fn test_every_query_provider_has_search_prefix() {
        for provider in CATALOG {
            assert_eq!(
                provider.query_pattern().is_some(),
                provider.search_prefix().is_some(),
                "{provider}"
            );
        }
    }
}
