//! Track resolution - turns links and search queries into track metadata.
//!
//! # Architecture
//!
//! This module follows the same separation throughout:
//! - **Domain models** (`domain.rs`) - [`Track`], requests and [`ResolveError`]
//! - **Provider catalog** (`provider.rs`, `classifier.rs`) - which source owns an input
//! - **DTOs** (`extractor/dto.rs`, `youtube/dto.rs`) - exact shapes of tool and API output
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - The yt-dlp invoker and the YouTube Data API client
//! - **Fallback chain** (`youtube/fallback.rs`) - API key rotation ending at the tool
//! - **Service** - High-level orchestration
//!
//! # Usage
//!
//! ```ignore
//! use jukebox_resolver::resolve::{ResolverConfig, ResolverService};
//!
//! let config = ResolverConfig {
//!     api_keys: vec!["your-api-key".to_string()],
//!     ..Default::default()
//! };
//! let service = ResolverService::new(config);
//!
//! for track in service.resolve("!yt daft punk around the world").await? {
//!     println!("{:?} - {:?} ({}s)", track.artist, track.title, track.duration);
//! }
//! ```

pub mod classifier;
pub mod domain;
pub mod duration;
pub mod extractor;
pub mod provider;
pub mod service;
pub mod traits;
pub mod youtube;

pub use classifier::classify;
pub use domain::{RequestKind, ResolutionRequest, ResolveError, Track};
pub use provider::{CATALOG, Provider, UnknownProvider};
pub use service::{ResolverConfig, ResolverService, extractor_version};
