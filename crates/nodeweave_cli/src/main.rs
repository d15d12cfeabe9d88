// SPDX-License-Identifier: MIT OR Apache-2.0
//! `nodeweave` - arrange shader node graphs from the command line.
//!
//! Reads graph documents written by an exporter (or builds one of the
//! ready-made node trees), runs the layout solver, and writes the graph back
//! with updated node positions.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over the verbosity flag
    let level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nodeweave={level},nodeweave_graph={level}")));

    // Logs go to stderr so documents can be piped from stdout
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting nodeweave v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = commands::run(&cli) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
