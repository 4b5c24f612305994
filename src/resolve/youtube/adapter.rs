//! Adapter layer: Convert YouTube API DTOs to domain models
//!
//! This is the ONLY place where YouTube DTO types are converted to domain
//! types. The API shape differs from the extraction tool's: the artist is
//! the channel, artwork is a nested thumbnail and durations are ISO-8601.

use super::dto;
use super::url::watch_url;
use crate::resolve::domain::Track;
use crate::resolve::duration;
use crate::resolve::provider::Provider;

/// Video ids from a search listing, skipping channel and playlist hits.
pub fn search_video_ids(response: dto::SearchResponse) -> Vec<String> {
    response
        .items
        .into_iter()
        .filter_map(|item| item.id.video_id)
        .collect()
}

/// Video ids from a playlist listing, in playlist order.
pub fn playlist_video_ids(response: dto::PlaylistItemsResponse) -> Vec<String> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            item.snippet
                .and_then(|s| s.resource_id)
                .and_then(|r| r.video_id)
                .or_else(|| item.content_details.and_then(|c| c.video_id))
        })
        .collect()
}

/// Convert a `videos` listing to tracks, preserving order.
pub fn to_tracks(response: dto::VideoListResponse) -> Vec<Track> {
    response.items.into_iter().map(to_track).collect()
}

/// Convert one API video to a canonical track.
pub fn to_track(video: dto::Video) -> Track {
    let duration = video
        .content_details
        .as_ref()
        .and_then(|c| c.duration.as_deref())
        .map_or(0, |period| match duration::parse_iso8601(period) {
            Some(secs) => secs,
            None => {
                tracing::warn!("Unparseable duration {:?} for video {}, using 0", period, video.id);
                0
            }
        });

    let mut track = Track::new(watch_url(&video.id), Provider::YouTube);
    track.duration = duration;

    if let Some(snippet) = video.snippet {
        track.title = snippet.title.filter(|t| !t.trim().is_empty());
        track.artist = snippet.channel_title.filter(|c| !c.trim().is_empty());
        let thumbnails = snippet.thumbnails;
        track.album_art_url = [thumbnails.medium, thumbnails.high, thumbnails.default]
            .into_iter()
            .flatten()
            .map(|t| t.url)
            .next();
    }

    track
}
