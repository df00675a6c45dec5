//! Album row operations, including the artist join table.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use super::artists::ArtistRow;
use crate::domain::{Album, AlbumKey, Artist};

/// Stored album row. Artists live in the join table and are loaded
/// separately.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AlbumRow {
    pub id: i64,
    pub title: String,
    pub cover: String,
    pub release_date: NaiveDate,
    pub external_url: Option<String>,
}

impl AlbumRow {
    /// Map the row into the domain entity, attaching the artists the caller
    /// loaded for it.
    pub fn into_album(self, artists: Vec<Artist>) -> Album {
        let album = Album::new(self.title, self.cover, self.release_date, artists);
        let album = match self.external_url {
            Some(url) => album.with_external_url(url),
            None => album,
        };
        album.with_id(self.id)
    }
}

/// Look up an album by its natural key: exact title plus exact release date.
pub async fn find_album_by_key(
    conn: &mut SqliteConnection,
    key: AlbumKey<'_>,
) -> sqlx::Result<Option<AlbumRow>> {
    sqlx::query_as::<_, AlbumRow>(
        "SELECT id, title, cover, release_date, external_url FROM albums \
         WHERE title = ? AND release_date = ?",
    )
    .bind(key.title)
    .bind(key.release_date)
    .fetch_optional(conn)
    .await
}

/// Insert an album row and return its id.
///
/// On a natural-key conflict the existing id is returned; the stored
/// payload (cover, external URL) is left as-is, since the first writer wins.
pub async fn insert_album(conn: &mut SqliteConnection, album: &Album) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO albums (title, cover, release_date, external_url)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(title, release_date) DO UPDATE SET title = excluded.title
        RETURNING id
        "#,
    )
    .bind(album.title())
    .bind(album.cover())
    .bind(album.release_date())
    .bind(album.external_url())
    .fetch_one(conn)
    .await?;

    Ok(row.0)
}

/// Link an artist to an album. Linking the same pair twice is a no-op.
pub async fn link_album_artist(
    conn: &mut SqliteConnection,
    album_id: i64,
    artist_id: i64,
) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO artists_albums (album_id, artist_id) VALUES (?, ?) \
         ON CONFLICT(album_id, artist_id) DO NOTHING",
    )
    .bind(album_id)
    .bind(artist_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Load the artists linked to an album, in link insertion order.
pub async fn get_album_artists(
    conn: &mut SqliteConnection,
    album_id: i64,
) -> sqlx::Result<Vec<ArtistRow>> {
    sqlx::query_as::<_, ArtistRow>(
        r#"
        SELECT a.id, a.name
        FROM artists a
        JOIN artists_albums aa ON aa.artist_id = a.id
        WHERE aa.album_id = ?
        ORDER BY aa.rowid
        "#,
    )
    .bind(album_id)
    .fetch_all(conn)
    .await
}
