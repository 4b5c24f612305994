//! Extraction tool integration (yt-dlp and compatible forks)
//!
//! Every provider except the YouTube API path is resolved by running the
//! tool and normalizing the `.info.json` files it leaves behind.

mod adapter;
pub mod dto;
mod invoker;

pub use adapter::{to_track, to_tracks};
pub use invoker::{ExtractorConfig, INFO_JSON_SUFFIX, WorkingDirectory, YtDlp};
