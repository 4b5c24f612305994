//! Adapter layer: convert extraction tool documents to tracks
//!
//! This is the ONLY place where [`InfoJson`] is turned into a [`Track`].
//! Field synonyms are resolved first-present-wins and the duration is
//! decoded defensively: a bad value becomes zero, never an error.

use super::dto::InfoJson;
use crate::resolve::domain::Track;
use crate::resolve::duration;
use crate::resolve::provider::Provider;

/// Normalize a tool document into a canonical track.
///
/// Callers are expected to have dropped documents without a URL; if one
/// slips through the track gets an empty URL.
pub fn to_track(doc: InfoJson, source: Provider) -> Track {
    let duration = duration_secs(doc.duration.as_ref(), doc.url().unwrap_or("?"));
    let url = doc.url().unwrap_or_default().to_string();

    Track {
        url,
        source: source.name().to_string(),
        title: first_present([doc.title, doc.track]),
        artist: first_present([doc.artist, doc.uploader]),
        album: first_present([doc.album]),
        album_art_url: first_present([doc.thumbnail]),
        duration,
        blacklisted: false,
        obsolete: false,
    }
}

/// Normalize a batch of documents, preserving order.
pub fn to_tracks(docs: Vec<InfoJson>, source: Provider) -> Vec<Track> {
    docs.into_iter().map(|doc| to_track(doc, source)).collect()
}

/// First non-empty value among synonyms.
fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Decode the raw `duration` field to whole seconds, zero on failure.
fn duration_secs(raw: Option<&serde_json::Value>, url: &str) -> u64 {
    let Some(raw) = raw else {
        tracing::debug!("No duration for {}, using 0", url);
        return 0;
    };

    let text = match raw {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match duration::parse_seconds(&text) {
        Some(secs) => secs,
        None => {
            tracing::warn!("Unparseable duration {} for {}, using 0", raw, url);
            0
        }
    }
}
