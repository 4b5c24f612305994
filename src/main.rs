//! Jukebox Resolver command-line entry point.

use clap::Parser;
use jukebox_resolver::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so stdout stays clean for --json)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jukebox_resolver=info")),
        )
        .init();

    cli::run_command(&args)
}
