//! Queue Minder command-line entry point.
//!
//! Loads a JSON queue file, builds the grouped view and applies drags or
//! removals to it, the same way a player UI would.

use clap::Parser;
use queue_minder::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("queue_minder=info".parse()?))
        .init();

    cli::run_command(&args)
}
