//! Jukebox Resolver - turns links and search queries into track metadata.
//!
//! Given a link to a supported site, a direct media file, or a `!yt` / `!sc`
//! search, the resolver works out which provider owns it and returns
//! normalized [`Track`](resolve::Track) records: title, artist, album,
//! artwork and duration. Metadata comes from a yt-dlp compatible tool, or
//! from the YouTube Data API when keys are configured.

pub mod cli;
pub mod config;
pub mod error;
pub mod resolve;
#[cfg(test)]
pub mod test_utils;
