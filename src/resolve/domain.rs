//! Internal domain models for track resolution.
//!
//! These types are OUR types - they don't change when the extraction tool or
//! the YouTube API change their output. Every provider document is converted
//! into a [`Track`] by an adapter.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::provider::Provider;

/// Canonical track record shared by all providers.
///
/// Ownership passes to the persistence layer once resolved; `blacklisted` and
/// `obsolete` are its state and always start out `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Canonical playable link
    pub url: String,
    /// Provider identifier (see [`Provider::name`])
    pub source: String,
    /// Track title
    pub title: Option<String>,
    /// Artist, or uploader/channel when no artist is known
    pub artist: Option<String>,
    /// Album title
    pub album: Option<String>,
    /// Artwork URL
    pub album_art_url: Option<String>,
    /// Duration in whole seconds, zero when unknown
    pub duration: u64,
    pub blacklisted: bool,
    pub obsolete: bool,
}

impl Track {
    /// Create a track with only the url and source set.
    pub fn new(url: impl Into<String>, source: Provider) -> Self {
        Self {
            url: url.into(),
            source: source.name().to_string(),
            title: None,
            artist: None,
            album: None,
            album_art_url: None,
            duration: 0,
            blacklisted: false,
            obsolete: false,
        }
    }
}

/// How a classified input is going to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// The input matched a provider's URL pattern
    SingleUrl,
    /// The input matched a provider's query sigil
    FreeTextQuery,
}

/// A classified user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub input: String,
    pub provider: Provider,
    pub kind: RequestKind,
}

impl ResolutionRequest {
    /// The query text with the provider's sigil removed.
    ///
    /// For URL requests this is the input unchanged.
    pub fn query_text(&self) -> &str {
        match self.kind {
            RequestKind::SingleUrl => &self.input,
            RequestKind::FreeTextQuery => self.provider.strip_sigil(&self.input),
        }
    }
}

/// Errors that abort a single resolution.
///
/// Per-document problems (malformed files, bad durations) are never
/// represented here: they are logged and skipped where they happen.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Failed to create working directory {path}: {source}")]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{what} timed out after {after:?}")]
    Timeout { what: String, after: Duration },

    #[error("Unexpected HTTP {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
