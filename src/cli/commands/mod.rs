//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for jukebox-resolver.
//! Each subcommand is implemented in its own submodule for maintainability:
//! - `resolve`: Resolving inputs and classifying them
//! - `tools`: Extraction tool and credential checks
//! - `settings`: Showing and initializing the config file

mod resolve;
mod settings;
mod tools;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use resolve::{cmd_classify, cmd_resolve};
pub use settings::cmd_config;
pub use tools::cmd_check_tools;

/// Jukebox resolver CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve links or `!yt` / `!sc` queries to track metadata
    Resolve {
        /// Links or queries, resolved concurrently
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Print the tracks as JSON
        #[arg(long)]
        json: bool,
        /// YouTube API key, repeatable (or set YOUTUBE_API_KEYS, comma separated)
        #[arg(long = "api-key", env = "YOUTUBE_API_KEYS", value_delimiter = ',')]
        api_keys: Vec<String>,
        /// Root for the extraction tool's working directories
        #[arg(long)]
        temp_dir: Option<PathBuf>,
    },
    /// Show which provider and strategy an input would use
    Classify {
        /// Link or query to classify
        input: String,
    },
    /// Check if the extraction tool is installed
    CheckTools,
    /// Show the config file location and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Resolve {
            inputs,
            json,
            api_keys,
            temp_dir,
        } => {
            let rt = Runtime::new()?;
            cmd_resolve(&rt, inputs, *json, api_keys, temp_dir.as_ref())
        }
        Commands::Classify { input } => cmd_classify(input),
        Commands::CheckTools => {
            let rt = Runtime::new()?;
            cmd_check_tools(&rt)
        }
        Commands::Config { init } => cmd_config(*init),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Print installation instructions for yt-dlp
pub(crate) fn print_extractor_install_instructions(program: &str) {
    eprintln!("Error: {} not found.", program);
    eprintln!("Install yt-dlp:");
    eprintln!("  Windows: winget install yt-dlp");
    eprintln!("  macOS:   brew install yt-dlp");
    eprintln!("  Linux:   pipx install yt-dlp");
}

/// Show only the end of a secret
pub(crate) fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

/// Format whole seconds as `m:ss` or `h:mm:ss`
pub(crate) fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
