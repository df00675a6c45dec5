//! Album catalog service
//!
//! Albums are deduplicated by natural key: exact title plus exact release
//! date. Two editions of an album released on different dates are distinct
//! catalog entries on purpose.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::db;
use crate::domain::{Album, Artist, ValidationError};
use crate::error::Result;
use crate::services::{artist, require_id};

/// Service for storing albums together with their artist credits.
pub struct AlbumService {
    pool: SqlitePool,
}

impl AlbumService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Return the stored album with this natural key, inserting it and its
    /// artist graph first when absent. Atomic either way.
    ///
    /// When the album already exists, its stored payload and stored artist
    /// credits win over whatever the caller passed in.
    pub async fn ensure_existent(&self, album: &Album) -> Result<Album> {
        let mut tx = self.pool.begin().await?;
        let ensured = ensure_album(&mut tx, album).await?;
        tx.commit().await?;
        Ok(ensured)
    }

    /// Credit an already persisted artist on an already persisted album.
    pub async fn add_artist(&self, album: &Album, artist: &Artist) -> Result<()> {
        let album_id = require_id(album.id(), "album")?;
        let artist_id = require_id(artist.id(), "artist")?;
        let mut conn = self.pool.acquire().await?;
        db::albums::link_album_artist(&mut conn, album_id, artist_id).await?;
        Ok(())
    }
}

/// Connection-level ensure step, shared with the track service so a whole
/// track graph can be persisted inside one transaction.
pub(crate) async fn ensure_album(conn: &mut SqliteConnection, album: &Album) -> Result<Album> {
    // Already persisted input passes through untouched
    if album.id().is_some() {
        return Ok(album.clone());
    }

    if let Some(row) = db::albums::find_album_by_key(conn, album.key()).await? {
        let mut artists = Vec::new();
        for artist_row in db::albums::get_album_artists(conn, row.id).await? {
            artists.push(artist_row.into_artist()?);
        }
        return Ok(row.into_album(artists));
    }

    if album.artists().is_empty() {
        return Err(ValidationError::NoArtists { entity: "album" }.into());
    }

    // Artists are resolved before the album row exists so the join rows
    // link two persisted identities
    let mut credited = Vec::with_capacity(album.artists().len());
    for unsaved in album.artists() {
        credited.push(artist::ensure_artist(conn, unsaved).await?);
    }

    debug!("Inserting new album: {}", album.title());
    let album_id = db::albums::insert_album(conn, album).await?;
    for stored in &credited {
        let artist_id = require_id(stored.id(), "artist")?;
        db::albums::link_album_artist(conn, album_id, artist_id).await?;
    }

    Ok(album.clone().with_id(album_id).with_artists(credited))
}
