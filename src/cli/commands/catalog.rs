//! Catalog listing, backlog inspection and seeding commands.

use sqlx::SqlitePool;

use crate::db;
use crate::domain::Isrc;
use crate::services::TrackService;

/// Starter codes for a demo reconciliation pass
const SEED_ISRCS: [&str; 10] = [
    "US7VG1846811",
    "US7QQ1846811",
    "BRC310600002",
    "BR1SP1200071",
    "BR1SP1200070",
    "BR1SP1500002",
    "BXKZM1900338",
    "BXKZM1900345",
    "QZNJX2081700",
    "QZNJX2078148",
];

/// List all tracks in the catalog
pub async fn cmd_list(pool: SqlitePool, json: bool) -> anyhow::Result<()> {
    let listings = TrackService::new(pool).list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if listings.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    for listing in &listings {
        println!(
            "{} - {} [{}] ({}, {})",
            listing.artists.join(", "),
            listing.title,
            listing.isrc,
            listing.album,
            listing.duration
        );
    }
    println!();
    println!("{} track(s).", listings.len());
    Ok(())
}

/// Show the queued ISRCs, or queue a new one
pub async fn cmd_backlog(pool: SqlitePool, code: Option<&str>) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;

    if let Some(code) = code {
        let isrc = Isrc::new(code)?;
        if db::backlog::insert_backlog_entry(&mut conn, &isrc).await? {
            println!("Queued {isrc}.");
        } else {
            println!("{isrc} is already queued.");
        }
        return Ok(());
    }

    let codes = db::backlog::get_backlog(&mut conn).await?;
    if codes.is_empty() {
        println!("Backlog is empty.");
        return Ok(());
    }
    for code in &codes {
        println!("{code}");
    }
    println!();
    println!("{} code(s) queued.", codes.len());
    Ok(())
}

/// Queue the given codes, or the starter batch when none are given
pub async fn cmd_seed(pool: SqlitePool, codes: &[String]) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;

    let codes: Vec<&str> = if codes.is_empty() {
        SEED_ISRCS.to_vec()
    } else {
        codes.iter().map(String::as_str).collect()
    };

    let mut queued = 0;
    for code in &codes {
        let isrc = Isrc::new(code)?;
        if db::backlog::insert_backlog_entry(&mut conn, &isrc).await? {
            queued += 1;
        }
    }

    println!("Queued {queued} of {} code(s).", codes.len());
    println!("Run `isrc-minder sync` to reconcile them.");
    Ok(())
}
