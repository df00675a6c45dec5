//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for Isrc Minder.
//! Each subcommand is implemented in its own submodule:
//! - `sync`: Backlog reconciliation and single-code lookup
//! - `catalog`: Catalog listing, backlog inspection and seeding

mod catalog;
mod sync;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

use crate::config::{self, Config};
use crate::db;
use crate::provider::spotify::{ClientCredentialsTokenSource, SpotifyClient};

pub use catalog::{cmd_backlog, cmd_list, cmd_seed};
pub use sync::{cmd_lookup, cmd_sync};

/// Isrc Minder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the missing-ISRC backlog against the streaming provider
    Sync {
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
        /// Spotify client id (or set SPOTIFY_CLIENT_ID env var)
        #[arg(long, env = "SPOTIFY_CLIENT_ID")]
        client_id: Option<String>,
        /// Spotify client secret (or set SPOTIFY_CLIENT_SECRET env var)
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET")]
        client_secret: Option<String>,
    },
    /// Look up one ISRC: the catalog first, then the provider
    Lookup {
        /// The ISRC to look up
        isrc: String,
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
        /// Spotify client id (or set SPOTIFY_CLIENT_ID env var)
        #[arg(long, env = "SPOTIFY_CLIENT_ID")]
        client_id: Option<String>,
        /// Spotify client secret (or set SPOTIFY_CLIENT_SECRET env var)
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET")]
        client_secret: Option<String>,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all tracks in the catalog
    List {
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the queued ISRCs, or queue a new one
    Backlog {
        /// Queue this code instead of listing
        code: Option<String>,
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Queue ISRCs for the next sync; defaults to a starter batch
    Seed {
        /// Codes to queue; with none given, a known starter batch is used
        codes: Vec<String>,
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

/// Run the specified CLI command.
pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = config::load();

    match cli.command {
        Commands::Sync {
            db,
            client_id,
            client_secret,
        } => {
            let pool = open_catalog(db, &config).await?;
            let provider = build_provider(client_id, client_secret, &config);
            sync::cmd_sync(pool, provider).await
        }
        Commands::Lookup {
            isrc,
            db,
            client_id,
            client_secret,
            json,
        } => {
            let pool = open_catalog(db, &config).await?;
            let provider = build_provider(client_id, client_secret, &config);
            sync::cmd_lookup(pool, provider, &isrc, json).await
        }
        Commands::List { db, json } => {
            let pool = open_catalog(db, &config).await?;
            catalog::cmd_list(pool, json).await
        }
        Commands::Backlog { code, db } => {
            let pool = open_catalog(db, &config).await?;
            catalog::cmd_backlog(pool, code.as_deref()).await
        }
        Commands::Seed { codes, db } => {
            let pool = open_catalog(db, &config).await?;
            catalog::cmd_seed(pool, &codes).await
        }
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Open the catalog database named by the flag, the config file, or the
/// default, in that order.
async fn open_catalog(flag: Option<PathBuf>, config: &Config) -> anyhow::Result<SqlitePool> {
    let path = flag.or_else(|| config.catalog.db_path.clone());
    let url = db::db_url(path.as_deref());
    db::init_db(&url)
        .await
        .with_context(|| format!("Failed to open catalog database at {url}"))
}

/// Build the provider stack from flags/env and the config file.
fn build_provider(
    client_id: Option<String>,
    client_secret: Option<String>,
    config: &Config,
) -> Arc<SpotifyClient> {
    let client_id = client_id.or_else(|| config.credentials.spotify_client_id.clone());
    let client_secret = client_secret.or_else(|| config.credentials.spotify_client_secret.clone());

    let (Some(client_id), Some(client_secret)) = (client_id, client_secret) else {
        eprintln!("Error: Spotify credentials required.");
        eprintln!("Create an app at: https://developer.spotify.com/dashboard");
        eprintln!(
            "Then use: --client-id/--client-secret, set SPOTIFY_CLIENT_ID/SPOTIFY_CLIENT_SECRET, \
             or add them to the config file"
        );
        std::process::exit(1);
    };

    let tokens = Arc::new(
        ClientCredentialsTokenSource::new(&config.provider.auth_url, client_id, client_secret)
            .with_refresh_margin(Duration::from_secs(config.provider.token_refresh_margin_secs)),
    );

    Arc::new(
        SpotifyClient::with_search_url(&config.provider.search_url, tokens)
            .with_region_market(&config.provider.region_market),
    )
}
