//! Trait definitions for the resolver's external collaborators.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`YtDlp`] and [`YouTubeClient`], while tests
//! substitute the recording mocks below.

use async_trait::async_trait;

use super::domain::{ResolveError, Track};
use super::extractor::YtDlp;
use super::extractor::dto::InfoJson;
use super::youtube::{ApiResponse, YouTubeClient};

/// Something that runs the extraction tool on a target.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Resolve `target` to the leaf documents the tool wrote, oldest first.
    async fn extract(
        &self,
        target: &str,
        extra_args: &[(&str, &str)],
    ) -> Result<Vec<InfoJson>, ResolveError>;
}

/// The YouTube Data API endpoints used by the fallback chain.
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// Search video ids.
    async fn search(
        &self,
        key: &str,
        query: &str,
        max_results: u32,
    ) -> Result<ApiResponse<Vec<String>>, ResolveError>;

    /// Video ids of a playlist.
    async fn playlist_items(
        &self,
        key: &str,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<ApiResponse<Vec<String>>, ResolveError>;

    /// Full details for a batch of ids.
    async fn videos(
        &self,
        key: &str,
        ids: &[String],
    ) -> Result<ApiResponse<Vec<Track>>, ResolveError>;
}

// Implement traits for real clients

#[async_trait]
impl MetadataExtractor for YtDlp {
    async fn extract(
        &self,
        target: &str,
        extra_args: &[(&str, &str)],
    ) -> Result<Vec<InfoJson>, ResolveError> {
        self.invoke(target, extra_args).await
    }
}

#[async_trait]
impl VideoApi for YouTubeClient {
    async fn search(
        &self,
        key: &str,
        query: &str,
        max_results: u32,
    ) -> Result<ApiResponse<Vec<String>>, ResolveError> {
        self.search(key, query, max_results).await
    }

    async fn playlist_items(
        &self,
        key: &str,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<ApiResponse<Vec<String>>, ResolveError> {
        self.playlist_items(key, playlist_id, max_results).await
    }

    async fn videos(
        &self,
        key: &str,
        ids: &[String],
    ) -> Result<ApiResponse<Vec<Track>>, ResolveError> {
        self.videos(key, ids).await
    }
}
