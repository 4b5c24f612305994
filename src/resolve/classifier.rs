//! Input classification.
//!
//! URL patterns are tried first over the whole catalog, then query sigils.
//! Within each pass the first provider in [`CATALOG`] order wins.

use super::domain::{RequestKind, ResolutionRequest};
use super::provider::{CATALOG, Provider};

/// Find the provider responsible for `input`.
///
/// Returns `None` when nothing matches; callers treat that as an empty
/// result rather than an error.
pub fn classify(input: &str) -> Option<ResolutionRequest> {
    classify_with(&CATALOG, input)
}

/// Classify against an explicit provider list.
pub fn classify_with(providers: &[Provider], input: &str) -> Option<ResolutionRequest> {
    let by_url = providers
        .iter()
        .find(|p| p.url_pattern().is_match(input))
        .map(|&provider| (provider, RequestKind::SingleUrl));

    let matched = by_url.or_else(|| {
        providers
            .iter()
            .find(|p| p.query_pattern().is_some_and(|re| re.is_match(input)))
            .map(|&provider| (provider, RequestKind::FreeTextQuery))
    });

    matched.map(|(provider, kind)| ResolutionRequest {
        input: input.to_string(),
        provider,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_of(input: &str) -> Option<(Provider, RequestKind)> {
        classify(input).map(|r| (r.provider, r.kind))
    }

    #[test]
    fn test_classify_urls() {
        assert_eq!(
            provider_of("https://youtu.be/abc123?x=1"),
            Some((Provider::YouTube, RequestKind::SingleUrl))
        );
        assert_eq!(
            provider_of("https://soundcloud.com/artist/track"),
            Some((Provider::SoundCloud, RequestKind::SingleUrl))
        );
        assert_eq!(
            provider_of("https://band.bandcamp.com/album/x"),
            Some((Provider::Bandcamp, RequestKind::SingleUrl))
        );
        assert_eq!(
            provider_of("https://cdn.example.org/a/b/track.ogg"),
            Some((Provider::DirectFile, RequestKind::SingleUrl))
        );
    }

    #[test]
    fn test_classify_queries() {
        assert_eq!(
            provider_of("!yt daft punk"),
            Some((Provider::YouTube, RequestKind::FreeTextQuery))
        );
        assert_eq!(
            provider_of("!sc daft punk"),
            Some((Provider::SoundCloud, RequestKind::FreeTextQuery))
        );
    }

    #[test]
    fn test_classify_not_found() {
        assert_eq!(provider_of("daft punk"), None);
        assert_eq!(provider_of("!xx daft punk"), None);
        assert_eq!(provider_of(""), None);
        assert_eq!(provider_of("https://example.org/page"), None);
    }

    #[test]
    fn test_url_match_beats_query_match() {
        // Satisfies both the direct-file URL shape and the YouTube sigil
        assert_eq!(
            provider_of("!yt song.mp3"),
            Some((Provider::DirectFile, RequestKind::SingleUrl))
        );
    }

    #[test]
    fn test_catalog_order_breaks_url_ties() {
        // Hosted file on bandcamp also looks like a direct file
        let input = "https://f4.bandcamp.com/stream/track.mp3";
        assert_eq!(provider_of(input), Some((Provider::Bandcamp, RequestKind::SingleUrl)));

        let reversed: Vec<Provider> = CATALOG.into_iter().rev().collect();
        let request = classify_with(&reversed, input).unwrap();
        assert_eq!(request.provider, Provider::DirectFile);
    }

    #[test]
    fn test_request_keeps_raw_input() {
        let request = classify("!sc lo-fi").unwrap();
        assert_eq!(request.input, "!sc lo-fi");
        assert_eq!(request.query_text(), "lo-fi");
    }
}
