//! Resolver service - turns raw user input into tracks
//!
//! This is the high-level API of the resolve module:
//! 1. Classify the input against the provider catalog
//! 2. Pick the provider's strategy for a link or a query
//! 3. Run the extraction tool or the YouTube fallback chain
//! 4. Normalize every document into a [`Track`]
//!
//! Unrecognized input is not an error; it resolves to nothing.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use super::classifier;
use super::domain::{RequestKind, ResolutionRequest, ResolveError, Track};
use super::extractor::{self, ExtractorConfig, YtDlp};
use super::provider::Provider;
use super::traits::{MetadataExtractor, VideoApi};
use super::youtube::{self, ApiFallbackChain, YouTubeClient};

/// Configuration for the resolver service
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// How to run the extraction tool
    pub extractor: ExtractorConfig,
    /// YouTube API keys, tried in order
    pub api_keys: Vec<String>,
    /// YouTube API root
    pub api_base_url: String,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
    /// Inputs resolved at once by [`ResolverService::resolve_many`]
    pub batch_concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            api_keys: Vec::new(),
            api_base_url: youtube::DEFAULT_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(15),
            batch_concurrency: 4,
        }
    }
}

/// Resolves links and queries from any supported provider
pub struct ResolverService {
    extractor: Arc<dyn MetadataExtractor>,
    youtube: ApiFallbackChain,
    batch_concurrency: usize,
}

impl ResolverService {
    /// Create a service backed by the real tool and API client
    pub fn new(config: ResolverConfig) -> Self {
        let extractor: Arc<dyn MetadataExtractor> = Arc::new(YtDlp::new(config.extractor));
        let api: Arc<dyn VideoApi> = Arc::new(YouTubeClient::with_base_url(
            config.api_base_url,
            config.http_timeout,
        ));
        Self::with_parts(extractor, api, config.api_keys, config.batch_concurrency)
    }

    /// Create a service from explicit collaborators (used by tests)
    pub fn with_parts(
        extractor: Arc<dyn MetadataExtractor>,
        api: Arc<dyn VideoApi>,
        api_keys: Vec<String>,
        batch_concurrency: usize,
    ) -> Self {
        Self {
            youtube: ApiFallbackChain::new(api, extractor.clone(), api_keys),
            extractor,
            batch_concurrency: batch_concurrency.max(1),
        }
    }

    /// Which provider and strategy `input` would use, if any.
    pub fn classify(&self, input: &str) -> Option<ResolutionRequest> {
        classifier::classify(input)
    }

    /// Resolve one raw input.
    ///
    /// Returns an empty list for input no provider recognizes.
    pub async fn resolve(&self, input: &str) -> Result<Vec<Track>, ResolveError> {
        let Some(request) = self.classify(input) else {
            tracing::info!("No provider recognizes {:?}", input);
            return Ok(Vec::new());
        };
        self.resolve_request(&request).await
    }

    /// Resolve an already classified request.
    pub async fn resolve_request(
        &self,
        request: &ResolutionRequest,
    ) -> Result<Vec<Track>, ResolveError> {
        tracing::info!(
            "Resolving {:?} as {:?} via {}",
            request.input,
            request.kind,
            request.provider
        );

        let tracks = match (request.provider, request.kind) {
            (Provider::YouTube, RequestKind::SingleUrl) => {
                self.resolve_youtube_link(&request.input).await?
            }
            (Provider::YouTube, RequestKind::FreeTextQuery) => {
                self.youtube.resolve(request.query_text(), false).await?
            }
            (provider, RequestKind::SingleUrl) => {
                self.extract(provider, &request.input).await?
            }
            (provider, RequestKind::FreeTextQuery) => {
                let target = format!(
                    "{}{}",
                    provider.search_prefix().unwrap_or_default(),
                    request.query_text()
                );
                self.extract(provider, &target).await?
            }
        };

        if tracks.is_empty() {
            tracing::warn!("Nothing resolved for {:?}", request.input);
        } else {
            tracing::info!("Resolved {} track(s) for {:?}", tracks.len(), request.input);
        }
        Ok(tracks)
    }

    /// Resolve several inputs concurrently.
    ///
    /// Returns one result per input, in input order. A failure for one input
    /// does not affect the others.
    pub async fn resolve_many<S: AsRef<str>>(
        &self,
        inputs: &[S],
    ) -> Vec<Result<Vec<Track>, ResolveError>> {
        stream::iter(inputs)
            .map(|input| self.resolve(input.as_ref()))
            .buffered(self.batch_concurrency)
            .collect()
            .await
    }

    /// Playlist links go through the API chain; anything else is rewritten
    /// to a canonical watch link and handed to the tool.
    async fn resolve_youtube_link(&self, url: &str) -> Result<Vec<Track>, ResolveError> {
        if youtube::url::playlist_id(url).is_some() {
            return self.youtube.resolve(url, true).await;
        }

        let target = match youtube::url::canonical_watch_url(url) {
            Some(canonical) => canonical,
            None => {
                tracing::debug!("No video id in {:?}, passing it through", url);
                url.to_string()
            }
        };
        self.extract(Provider::YouTube, &target).await
    }

    async fn extract(&self, provider: Provider, target: &str) -> Result<Vec<Track>, ResolveError> {
        let docs = self
            .extractor
            .extract(target, provider.extractor_args())
            .await?;
        Ok(extractor::to_tracks(docs, provider))
    }
}

/// Version of the configured extraction tool, `None` if it cannot be run.
pub async fn extractor_version(config: &ExtractorConfig) -> Option<String> {
    YtDlp::new(config.clone()).version().await
}
