//! Resolution and classification commands.

use serde::Serialize;
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config;
use crate::error::Result;
use crate::resolve::{RequestKind, ResolveError, ResolverService, Track, classify};

use super::format_duration;

/// Result for one input, as printed with `--json`
#[derive(Debug, Serialize)]
struct Outcome<'a> {
    input: &'a str,
    tracks: &'a [Track],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Resolve each input and print the tracks
pub fn cmd_resolve(
    rt: &Runtime,
    inputs: &[String],
    json: bool,
    api_keys: &[String],
    temp_dir: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let mut config = config::load_with_keys(api_keys);
    if let Some(dir) = temp_dir {
        config.resolver.temp_dir = Some(dir.clone());
    }

    let service = ResolverService::new(config.resolver_config());
    let results = rt.block_on(service.resolve_many(inputs));

    let failures = results.iter().filter(|r| r.is_err()).count();
    if json {
        println!("{}", render_json(inputs, &results)?);
    } else {
        print_text(inputs, &results);
    }

    if failures > 0 {
        anyhow::bail!("{} of {} input(s) failed", failures, inputs.len());
    }
    Ok(())
}

/// Show how an input would be resolved
pub fn cmd_classify(input: &str) -> anyhow::Result<()> {
    match classify(input) {
        Some(request) => {
            println!("Provider: {}", request.provider);
            match request.kind {
                RequestKind::SingleUrl => println!("Kind:     link"),
                RequestKind::FreeTextQuery => {
                    println!("Kind:     search");
                    println!("Query:    {}", request.query_text());
                }
            }
        }
        None => {
            println!("✗ No provider recognizes {:?}", input);
            println!("  Use a supported link, or prefix a search with !yt or !sc");
        }
    }
    Ok(())
}

fn render_json(
    inputs: &[String],
    results: &[std::result::Result<Vec<Track>, ResolveError>],
) -> Result<String> {
    let outcomes: Vec<Outcome<'_>> = inputs
        .iter()
        .zip(results)
        .map(|(input, result)| match result {
            Ok(tracks) => Outcome {
                input,
                tracks,
                error: None,
            },
            Err(e) => Outcome {
                input,
                tracks: &[],
                error: Some(e.to_string()),
            },
        })
        .collect();
    Ok(serde_json::to_string_pretty(&outcomes)?)
}

fn print_text(inputs: &[String], results: &[std::result::Result<Vec<Track>, ResolveError>]) {
    for (input, result) in inputs.iter().zip(results) {
        println!("{}", input);
        match result {
            Ok(tracks) if tracks.is_empty() => println!("  ✗ Nothing found"),
            Ok(tracks) => {
                println!("  ✓ {} track(s)", tracks.len());
                for track in tracks {
                    println!("    {}", describe(track));
                    println!("      {}", track.url);
                }
            }
            Err(e) => println!("  ✗ {}", e),
        }
        println!();
    }
}

fn describe(track: &Track) -> String {
    let title = track.title.as_deref().unwrap_or("(untitled)");
    let mut line = match &track.artist {
        Some(artist) => format!("{} - {}", artist, title),
        None => title.to_string(),
    };
    if let Some(album) = &track.album {
        line.push_str(&format!(" [{}]", album));
    }
    if track.duration > 0 {
        line.push_str(&format!(" ({})", format_duration(track.duration)));
    }
    line
}
