//! YouTube Data API v3 integration.
//!
//! Queries and playlists are resolved through the API when keys are
//! configured, rotating through keys as quotas run out:
//!
//! 1. `search` (or `playlistItems`) lists up to 5 (or 50) video ids
//! 2. `videos` fetches title, channel, artwork and duration for all of them
//!    in one call
//! 3. If the key is refused at either step, the next key repeats both
//! 4. With no keys left, the extraction tool resolves the request instead
//!
//! Single video links never reach the API; they go to the extraction tool
//! as canonical watch links.

mod adapter;
mod client;
pub mod dto;
mod fallback;
pub mod url;

pub use client::{ApiResponse, DEFAULT_BASE_URL, StatusClass, YouTubeClient, classify_status};
pub use fallback::{ApiFallbackChain, PLAYLIST_PAGE_SIZE, SEARCH_PAGE_SIZE};
