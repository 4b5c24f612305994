//! YouTube Data API v3 HTTP client
//!
//! See: https://developers.google.com/youtube/v3/docs
//!
//! ## Status handling
//!
//! Only 200 is success. 401, 403 and 429 mean the key was refused (quota
//! exhausted, key disabled, rate limited) and come back as
//! [`ApiResponse::Rejected`] so the caller can move on to the next key.
//! Anything else is an error for the whole resolution.
//!
//! Query values always go through reqwest's encoder; user input is never
//! spliced into the URL by hand.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::{adapter, dto};
use crate::resolve::domain::{ResolveError, Track};

/// Public API root.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Outcome of a call made with one API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Success(T),
    /// The key was refused; try the next one
    Rejected { status: u16, reason: Option<String> },
}

/// How a response status is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    KeyRejected,
    Fatal,
}

/// Classify an HTTP status from the API.
pub fn classify_status(status: StatusCode) -> StatusClass {
    match status {
        StatusCode::OK => StatusClass::Success,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            StatusClass::KeyRejected
        }
        _ => StatusClass::Fatal,
    }
}

/// YouTube Data API client
pub struct YouTubeClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl YouTubeClient {
    /// Create a client against the public API.
    ///
    /// `timeout` bounds each request from connect to the end of the body.
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create a client for a different API root (proxies, tests).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search videos matching `query`.
    pub async fn search(
        &self,
        key: &str,
        query: &str,
        max_results: u32,
    ) -> Result<ApiResponse<Vec<String>>, ResolveError> {
        let max_results = max_results.to_string();
        let response = self
            .get::<dto::SearchResponse>(
                "search",
                &[
                    ("key", key),
                    ("part", "snippet"),
                    ("type", "video"),
                    ("maxResults", &max_results),
                    ("q", query),
                ],
            )
            .await?;
        Ok(map_success(response, adapter::search_video_ids))
    }

    /// List the videos of a playlist.
    pub async fn playlist_items(
        &self,
        key: &str,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<ApiResponse<Vec<String>>, ResolveError> {
        let max_results = max_results.to_string();
        let response = self
            .get::<dto::PlaylistItemsResponse>(
                "playlistItems",
                &[
                    ("key", key),
                    ("part", "snippet"),
                    ("maxResults", &max_results),
                    ("playlistId", playlist_id),
                ],
            )
            .await?;
        Ok(map_success(response, adapter::playlist_video_ids))
    }

    /// Fetch snippet and duration for all `ids` in one call.
    pub async fn videos(
        &self,
        key: &str,
        ids: &[String],
    ) -> Result<ApiResponse<Vec<Track>>, ResolveError> {
        let ids = ids.join(",");
        let response = self
            .get::<dto::VideoListResponse>(
                "videos",
                &[("key", key), ("part", "snippet,contentDetails"), ("id", &ids)],
            )
            .await?;
        Ok(map_success(response, adapter::to_tracks))
    }

    /// Send a GET to `endpoint` and decode a 200 body as `T`.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse<T>, ResolveError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;

        let status = response.status();
        match classify_status(status) {
            StatusClass::Success => response
                .json::<T>()
                .await
                .map(ApiResponse::Success)
                .map_err(|e| ResolveError::Parse(format!("{endpoint}: {e}"))),
            StatusClass::KeyRejected => {
                let reason = response
                    .json::<dto::ErrorResponse>()
                    .await
                    .ok()
                    .and_then(|e| e.reason().map(str::to_string));
                Ok(ApiResponse::Rejected {
                    status: status.as_u16(),
                    reason,
                })
            }
            StatusClass::Fatal => {
                let body = response.text().await.unwrap_or_default();
                tracing::debug!(
                    "{} returned {}: {}",
                    endpoint,
                    status,
                    body.chars().take(200).collect::<String>()
                );
                Err(ResolveError::UnexpectedStatus {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                })
            }
        }
    }
}

fn map_success<T, U>(response: ApiResponse<T>, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
    match response {
        ApiResponse::Success(value) => ApiResponse::Success(f(value)),
        ApiResponse::Rejected { status, reason } => ApiResponse::Rejected { status, reason },
    }
}
