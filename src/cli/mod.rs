//! Command-line interface for jukebox-resolver.
//!
//! This module provides CLI commands for resolving links and queries,
//! checking the extraction tool, and managing the config file.

mod commands;

pub use commands::{Cli, Commands, run_command};
