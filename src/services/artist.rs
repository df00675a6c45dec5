//! Artist catalog service
//!
//! Artists are deduplicated by exact name: ensuring the same name twice
//! always resolves to the same stored row.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::db;
use crate::domain::{Album, Artist, Track};
use crate::error::Result;
use crate::services::require_id;

/// Service for storing and linking artists.
pub struct ArtistService {
    pool: SqlitePool,
}

impl ArtistService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Return the stored artist with this name, inserting it first when
    /// absent. The returned artist always carries its storage id.
    pub async fn ensure_existent(&self, artist: &Artist) -> Result<Artist> {
        let mut conn = self.pool.acquire().await?;
        ensure_artist(&mut conn, artist).await
    }

    /// Credit an artist on an album. Both must already be persisted;
    /// crediting the same pair again is a no-op.
    pub async fn add_to_album(&self, artist: &Artist, album: &Album) -> Result<()> {
        let artist_id = require_id(artist.id(), "artist")?;
        let album_id = require_id(album.id(), "album")?;
        let mut conn = self.pool.acquire().await?;
        db::albums::link_album_artist(&mut conn, album_id, artist_id).await?;
        Ok(())
    }

    /// Credit an artist on a track. Both must already be persisted;
    /// crediting the same pair again is a no-op.
    pub async fn add_to_track(&self, artist: &Artist, track: &Track) -> Result<()> {
        let artist_id = require_id(artist.id(), "artist")?;
        let track_id = require_id(track.id(), "track")?;
        let mut conn = self.pool.acquire().await?;
        db::tracks::link_track_artist(&mut conn, track_id, artist_id).await?;
        Ok(())
    }
}

/// Connection-level ensure step, shared with the album and track services so
/// a whole entity graph can be persisted inside one transaction.
pub(crate) async fn ensure_artist(conn: &mut SqliteConnection, artist: &Artist) -> Result<Artist> {
    // Already persisted input passes through untouched
    if artist.id().is_some() {
        return Ok(artist.clone());
    }

    if let Some(row) = db::artists::find_artist_by_name(conn, artist.name()).await? {
        return Ok(row.into_artist()?);
    }

    debug!("Inserting new artist: {}", artist.name());
    let id = db::artists::insert_artist(conn, artist.name()).await?;
    Ok(artist.clone().with_id(id))
}
