//! Simplecast Source - sources podcast metadata as content-graph nodes.
//!
//! JSON goes to stdout; logs go to stderr so output can be piped.

use clap::Parser;
use simplecast_source::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("simplecast_source=info".parse()?))
        .init();

    cli::run_command(&args)
}
