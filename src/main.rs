//! Smartlink - build and track multi-platform music link pages from the
//! command line.

use clap::Parser;
use smartlink::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so command output stays pipeable)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("smartlink=info".parse()?))
        .init();

    cli::run_command(&args)
}
