//! Isrc Minder - an ISRC-keyed music catalog.
//!
//! Maintains a local catalog of tracks keyed by ISRC, reconciles a backlog
//! of missing codes against a streaming provider, and answers single-code
//! lookups by consulting the catalog before the provider.

pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod provider;
pub mod services;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("isrc_minder=info".parse().unwrap()))
        .init();

    let args = cli::Cli::parse();
    cli::run_command(args).await
}
