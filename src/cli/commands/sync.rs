//! Backlog reconciliation and single-code lookup commands.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::domain::{Isrc, Track};
use crate::provider::spotify::SpotifyClient;
use crate::services::SyncService;

/// Reconcile the whole backlog against the provider
pub async fn cmd_sync(pool: SqlitePool, provider: Arc<SpotifyClient>) -> anyhow::Result<()> {
    let service = SyncService::new(pool, provider);
    let report = service.sync_missing_isrcs().await?;

    if report.total() == 0 {
        println!("Backlog is empty, nothing to reconcile.");
        return Ok(());
    }

    println!("Reconciled {} queued code(s):", report.total());
    println!("  Resolved locally: {}", report.resolved);
    println!("  Imported:         {}", report.imported);
    println!("  Unresolved:       {}", report.unresolved);
    if report.unresolved > 0 {
        println!();
        println!("Unresolved codes stay queued for the next run.");
    }
    Ok(())
}

/// Look up one ISRC, consulting the catalog before the provider
pub async fn cmd_lookup(
    pool: SqlitePool,
    provider: Arc<SpotifyClient>,
    code: &str,
    json: bool,
) -> anyhow::Result<()> {
    let isrc = Isrc::new(code)?;
    let service = SyncService::new(pool, provider);

    match service.sync_isrc(&isrc).await? {
        Some(track) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&track)?);
            } else {
                print_track(&track);
            }
        }
        None => {
            println!("✗ No match for {isrc} in the catalog or at the provider.");
        }
    }
    Ok(())
}

fn print_track(track: &Track) {
    let artists: Vec<&str> = track.artists().iter().map(|a| a.name()).collect();

    println!("{} [{}]", track.title(), track.isrc());
    println!("  Artists:  {}", artists.join(", "));
    println!(
        "  Album:    {} ({})",
        track.album().title(),
        track.album().release_date()
    );
    println!("  Duration: {}", track.duration());
    println!(
        "  BR:       {}",
        if track.br_enabled() {
            "enabled"
        } else {
            "not enabled"
        }
    );
    if let Some(url) = track.external_url() {
        println!("  Link:     {url}");
    }
    println!(
        "  Stored:   {}",
        if track.id().is_some() {
            "yes"
        } else {
            "no (provider result)"
        }
    );
}
