//! Quota-aware key rotation for the YouTube API.
//!
//! Keys are tried one at a time, in configured order. A key is abandoned
//! only when the API refuses it; the listing call and the details call are
//! a single unit, so a key refused on details restarts the whole unit with
//! the next key. When every key has been refused (or none is configured)
//! the extraction tool takes over.
//!
//! Nothing is remembered between resolutions: every request starts again
//! from the first key.

use std::sync::Arc;

use super::client::ApiResponse;
use super::url::playlist_id;
use crate::resolve::domain::{ResolveError, Track};
use crate::resolve::extractor;
use crate::resolve::provider::Provider;
use crate::resolve::traits::{MetadataExtractor, VideoApi};

/// Results requested from `search`.
pub const SEARCH_PAGE_SIZE: u32 = 5;

/// Items requested from `playlistItems`.
pub const PLAYLIST_PAGE_SIZE: u32 = 50;

/// Resolves YouTube searches and playlists through the API, falling back to
/// the extraction tool.
pub struct ApiFallbackChain {
    api: Arc<dyn VideoApi>,
    extractor: Arc<dyn MetadataExtractor>,
    api_keys: Vec<String>,
}

impl ApiFallbackChain {
    pub fn new(
        api: Arc<dyn VideoApi>,
        extractor: Arc<dyn MetadataExtractor>,
        api_keys: Vec<String>,
    ) -> Self {
        Self {
            api,
            extractor,
            api_keys,
        }
    }

    /// Resolve a text query (`is_playlist == false`) or a playlist link or
    /// id (`is_playlist == true`).
    ///
    /// Unexpected API statuses and network failures end the resolution;
    /// they do not advance to the next key.
    pub async fn resolve(&self, query: &str, is_playlist: bool) -> Result<Vec<Track>, ResolveError> {
        if self.api_keys.is_empty() {
            tracing::info!("No YouTube API keys configured, using the extractor");
            return self.fallback(query, is_playlist).await;
        }

        tracing::info!("Searching {:?} with the YouTube API", query);
        for (index, key) in self.api_keys.iter().enumerate() {
            match self.try_key(key, query, is_playlist).await? {
                ApiResponse::Success(tracks) => return Ok(tracks),
                ApiResponse::Rejected { status, reason } => {
                    tracing::info!(
                        "YouTube API key #{} refused (HTTP {}, {}), trying the next one",
                        index + 1,
                        status,
                        reason.as_deref().unwrap_or("no reason given")
                    );
                }
            }
        }

        tracing::info!(
            "All {} YouTube API key(s) refused, using the extractor",
            self.api_keys.len()
        );
        self.fallback(query, is_playlist).await
    }

    /// One listing + details round with a single key.
    async fn try_key(
        &self,
        key: &str,
        query: &str,
        is_playlist: bool,
    ) -> Result<ApiResponse<Vec<Track>>, ResolveError> {
        let listing = if is_playlist {
            let id = playlist_id(query).unwrap_or(query);
            self.api.playlist_items(key, id, PLAYLIST_PAGE_SIZE).await?
        } else {
            self.api.search(key, query, SEARCH_PAGE_SIZE).await?
        };

        let ids = match listing {
            ApiResponse::Success(ids) => ids,
            ApiResponse::Rejected { status, reason } => {
                return Ok(ApiResponse::Rejected { status, reason });
            }
        };

        if ids.is_empty() {
            tracing::warn!("Nothing found on YouTube for {:?}", query);
            return Ok(ApiResponse::Success(Vec::new()));
        }

        self.api.videos(key, &ids).await
    }

    /// Resolve with the extraction tool instead of the API.
    ///
    /// Playlists are enumerated from their link; queries become a
    /// `ytsearch5:` search.
    async fn fallback(&self, query: &str, is_playlist: bool) -> Result<Vec<Track>, ResolveError> {
        let docs = if is_playlist {
            self.extractor
                .extract(query, Provider::YouTube.extractor_args())
                .await?
        } else {
            let prefix = Provider::YouTube.search_prefix().unwrap_or_default();
            self.extractor.extract(&format!("{prefix}{query}"), &[]).await?
        };
        Ok(extractor::to_tracks(docs, Provider::YouTube))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::traits::mocks::{ApiCall, KeyBehavior, MockExtractor, MockVideoApi};
    use crate::test_utils::{info_json, mock_track};

    fn chain(
        api: &Arc<MockVideoApi>,
        extractor: &Arc<MockExtractor>,
        keys: &[&str],
    ) -> ApiFallbackChain {
        ApiFallbackChain::new(
            api.clone(),
            extractor.clone(),
            keys.iter().map(|k| k.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_second_key_used_after_quota_rejection() {
        let api = Arc::new(MockVideoApi::new([
            ("A", KeyBehavior::Reject(403)),
            ("B", KeyBehavior::Succeed(vec![mock_track("b-song")])),
        ]));
        let extractor = Arc::new(MockExtractor::empty());

        let tracks = chain(&api, &extractor, &["A", "B"])
            .resolve("daft punk", false)
            .await
            .unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title.as_deref(), Some("b-song"));
        assert!(extractor.calls().is_empty());
        assert_eq!(
            api.calls(),
            [
                ApiCall::Search { key: "A".into(), query: "daft punk".into(), max_results: 5 },
                ApiCall::Search { key: "B".into(), query: "daft punk".into(), max_results: 5 },
                ApiCall::Videos { key: "B".into(), ids: vec!["vid-0".into()] },
            ]
        );
    }

    #[tokio::test]
    async fn test_first_success_stops_rotation() {
        let api = Arc::new(MockVideoApi::new([
            ("A", KeyBehavior::Succeed(vec![mock_track("a"), mock_track("b")])),
            ("B", KeyBehavior::Succeed(vec![mock_track("never")])),
        ]));
        let extractor = Arc::new(MockExtractor::empty());

        let tracks = chain(&api, &extractor, &["A", "B"])
            .resolve("q", false)
            .await
            .unwrap();

        assert_eq!(tracks.len(), 2);
        assert!(api.calls().iter().all(|c| !matches!(c,
            ApiCall::Search { key, .. } | ApiCall::Videos { key, .. } if key == "B")));
    }

    #[tokio::test]
    async fn test_all_keys_rejected_falls_back_to_search() {
        let api = Arc::new(MockVideoApi::new([("A", KeyBehavior::Reject(403))]));
        let extractor = Arc::new(MockExtractor::with_docs(vec![info_json(
            "https://www.youtube.com/watch?v=f1",
            "Fallback",
        )]));

        let tracks = chain(&api, &extractor, &["A"])
            .resolve("lofi beats", false)
            .await
            .unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title.as_deref(), Some("Fallback"));
        assert_eq!(tracks[0].source, "youtube");

        let calls = extractor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].target, "ytsearch5:lofi beats");
        assert!(calls[0].extra_args.is_empty());
    }

    #[tokio::test]
    async fn test_no_keys_goes_straight_to_extractor() {
        let api = Arc::new(MockVideoApi::default());
        let extractor = Arc::new(MockExtractor::empty());

        let tracks = chain(&api, &extractor, &[]).resolve("q", false).await.unwrap();

        assert!(tracks.is_empty());
        assert!(api.calls().is_empty());
        assert_eq!(extractor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_details_rejection_restarts_unit_with_next_key() {
        let api = Arc::new(MockVideoApi::new([
            ("A", KeyBehavior::RejectDetails),
            ("B", KeyBehavior::Succeed(vec![mock_track("b")])),
        ]));
        let extractor = Arc::new(MockExtractor::empty());

        let tracks = chain(&api, &extractor, &["A", "B"])
            .resolve("q", false)
            .await
            .unwrap();

        assert_eq!(tracks.len(), 1);
        let keys: Vec<_> = api
            .calls()
            .into_iter()
            .map(|c| match c {
                ApiCall::Search { key, .. } => format!("search:{key}"),
                ApiCall::PlaylistItems { key, .. } => format!("playlist:{key}"),
                ApiCall::Videos { key, .. } => format!("videos:{key}"),
            })
            .collect();
        assert_eq!(keys, ["search:A", "videos:A", "search:B", "videos:B"]);
    }

    #[tokio::test]
    async fn test_unexpected_status_is_fatal() {
        let api = Arc::new(MockVideoApi::new([
            ("A", KeyBehavior::Fail(500)),
            ("B", KeyBehavior::Succeed(vec![mock_track("b")])),
        ]));
        let extractor = Arc::new(MockExtractor::empty());

        let result = chain(&api, &extractor, &["A", "B"]).resolve("q", false).await;

        assert!(matches!(
            result,
            Err(ResolveError::UnexpectedStatus { status: 500, .. })
        ));
        assert_eq!(api.calls().len(), 1);
        assert!(extractor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_is_fatal_and_keeps_next_key_unused() {
        let api = Arc::new(MockVideoApi::new([
            ("A", KeyBehavior::Network),
            ("B", KeyBehavior::Succeed(vec![mock_track("b")])),
        ]));
        let extractor = Arc::new(MockExtractor::empty());

        let result = chain(&api, &extractor, &["A", "B"]).resolve("q", false).await;

        assert!(matches!(result, Err(ResolveError::Network(_))));
        assert_eq!(
            api.calls(),
            [ApiCall::Search { key: "A".into(), query: "q".into(), max_results: 5 }]
        );
        assert!(extractor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_listing_returns_nothing_without_details() {
        let api = Arc::new(MockVideoApi::new([
            ("A", KeyBehavior::NoResults),
            ("B", KeyBehavior::Succeed(vec![mock_track("b")])),
        ]));
        let extractor = Arc::new(MockExtractor::empty());

        let tracks = chain(&api, &extractor, &["A", "B"])
            .resolve("zzzz", false)
            .await
            .unwrap();

        assert!(tracks.is_empty());
        assert_eq!(api.calls().len(), 1);
        assert!(extractor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_playlist_uses_playlist_items() {
        let api = Arc::new(MockVideoApi::new([(
            "A",
            KeyBehavior::Succeed(vec![mock_track("1"), mock_track("2")]),
        )]));
        let extractor = Arc::new(MockExtractor::empty());

        let tracks = chain(&api, &extractor, &["A"])
            .resolve("https://www.youtube.com/watch?v=x&list=PL42", true)
            .await
            .unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(
            api.calls()[0],
            ApiCall::PlaylistItems {
                key: "A".into(),
                playlist_id: "PL42".into(),
                max_results: 50
            }
        );
    }

    #[tokio::test]
    async fn test_playlist_fallback_enumerates_link() {
        let api = Arc::new(MockVideoApi::new([("A", KeyBehavior::Reject(429))]));
        let extractor = Arc::new(MockExtractor::empty());
        let url = "https://www.youtube.com/playlist?list=PL42";

        chain(&api, &extractor, &["A"]).resolve(url, true).await.unwrap();

        let calls = extractor.calls();
        assert_eq!(calls[0].target, url);
        assert_eq!(
            calls[0].extra_args,
            [("yes-playlist".to_string(), String::new())]
        );
    }

    #[tokio::test]
    async fn test_fallback_failure_propagates() {
        let api = Arc::new(MockVideoApi::default());
        let extractor = Arc::new(MockExtractor::failing());

        let result = chain(&api, &extractor, &[]).resolve("q", false).await;
        assert!(matches!(result, Err(ResolveError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_no_state_between_resolutions() {
        let api = Arc::new(MockVideoApi::new([
            ("A", KeyBehavior::Reject(403)),
            ("B", KeyBehavior::Succeed(vec![mock_track("b")])),
        ]));
        let extractor = Arc::new(MockExtractor::empty());
        let chain = chain(&api, &extractor, &["A", "B"]);

        chain.resolve("first", false).await.unwrap();
        chain.resolve("second", false).await.unwrap();

        let searches: Vec<_> = api
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Search { key, query, .. } => Some(format!("{query}:{key}")),
                _ => None,
            })
            .collect();
        assert_eq!(searches, ["first:A", "first:B", "second:A", "second:B"]);
    }
}
