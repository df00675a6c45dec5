//! Track catalog service
//!
//! Storing a track persists its whole graph in one transaction: the album,
//! every artist credit on both, and the join rows. Either everything lands
//! or nothing does.

use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::db;
use crate::db::tracks::TrackRecord;
use crate::domain::{Duration, Isrc, Track, ValidationError};
use crate::error::Result;
use crate::services::{album, artist, require_id};

/// Service for storing and querying tracks.
pub struct TrackService {
    pool: SqlitePool,
}

impl TrackService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a track with its full album and artist graph, atomically.
    ///
    /// The returned track carries storage ids throughout. Albums and artists
    /// are deduplicated against the catalog; the track itself must be new,
    /// since each ISRC may appear at most once.
    pub async fn store(&self, track: &Track) -> Result<Track> {
        let mut tx = self.pool.begin().await?;
        let stored = persist_track(&mut tx, track).await?;
        tx.commit().await?;
        Ok(stored)
    }

    /// Persist a provider-shaped flattened record.
    ///
    /// Accepts the JSON shape tracks serialize to, with artist credits as
    /// bare names and the album nested, and rejects malformed payloads
    /// before touching the store.
    pub async fn store_record(&self, record: serde_json::Value) -> Result<Track> {
        let track: Track = serde_json::from_value(record)?;
        self.store(&track).await
    }

    /// The stored track with this ISRC, fully loaded, or absent.
    pub async fn search_by_isrc(&self, isrc: &Isrc) -> Result<Option<Track>> {
        let mut conn = self.pool.acquire().await?;
        match db::tracks::get_track_by_isrc(&mut conn, isrc).await? {
            Some(record) => Ok(Some(record.into_track()?)),
            None => Ok(None),
        }
    }

    /// Flattened listing of the whole catalog, ordered by title.
    pub async fn list(&self) -> Result<Vec<TrackListing>> {
        let mut conn = self.pool.acquire().await?;
        let records = db::tracks::list_tracks(&mut conn).await?;
        Ok(records.into_iter().map(TrackListing::from).collect())
    }
}

/// Connection-level persist step, shared with the sync service so a whole
/// backlog pass can run inside one transaction.
pub(crate) async fn persist_track(conn: &mut SqliteConnection, track: &Track) -> Result<Track> {
    if track.artists().is_empty() {
        return Err(ValidationError::NoArtists { entity: "track" }.into());
    }

    let stored_album = album::ensure_album(conn, track.album()).await?;
    let album_id = require_id(stored_album.id(), "album")?;

    // Track credits are resolved independently of the album's, before
    // the track row exists
    let mut credited = Vec::with_capacity(track.artists().len());
    for unsaved in track.artists() {
        credited.push(artist::ensure_artist(conn, unsaved).await?);
    }

    debug!("Inserting track {}: {}", track.isrc(), track.title());
    let track_id = db::tracks::insert_track(conn, track, album_id).await?;
    for stored in &credited {
        let artist_id = require_id(stored.id(), "artist")?;
        db::tracks::link_track_artist(conn, track_id, artist_id).await?;
    }

    Ok(track
        .clone()
        .with_id(track_id)
        .with_album(stored_album)
        .with_artists(credited))
}

/// One row of the catalog listing: a track flattened with its album title
/// and artist names, ready for display or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackListing {
    pub isrc: String,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub release_date: chrono::NaiveDate,
    pub duration: String,
    pub br_enabled: bool,
}

impl From<TrackRecord> for TrackListing {
    fn from(record: TrackRecord) -> Self {
        let artists = record.artist_names().map(str::to_owned).collect();
        let duration = Duration::from_seconds(record.duration)
            .map(|d| d.to_string())
            .unwrap_or_else(|_| "--:--".to_string());

        Self {
            isrc: record.isrc,
            title: record.title,
            artists,
            album: record.album_title,
            release_date: record.release_date,
            duration,
            br_enabled: record.br_enabled,
        }
    }
}
