//! Track row operations: scalar inserts, the artist join table, and the
//! joined reads that reassemble full domain entities.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::domain::{Album, Artist, Duration, Isrc, Track, ValidationError};

/// Separator for the aggregated artist-name column. The unit separator
/// control character cannot appear in a name, unlike a comma.
const NAME_SEPARATOR: char = '\u{1f}';

const JOINED_TRACK_SELECT: &str = r#"
SELECT
    t.id, t.isrc, t.title, t.duration, t.external_url, t.br_enabled, t.preview_url,
    t.album_id,
    al.title AS album_title,
    al.cover,
    al.release_date,
    al.external_url AS album_external_url,
    GROUP_CONCAT(ar.name, char(31)) AS artists
FROM tracks t
JOIN tracks_artists ta ON ta.track_id = t.id
JOIN artists ar ON ar.id = ta.artist_id
JOIN albums al ON al.id = t.album_id
"#;

/// A track joined with its album and aggregated artist names, as read from
/// the store.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrackRecord {
    pub id: i64,
    pub isrc: String,
    pub title: String,
    pub duration: i64,
    pub external_url: Option<String>,
    pub br_enabled: bool,
    pub preview_url: Option<String>,
    pub album_id: i64,
    pub album_title: String,
    pub cover: String,
    pub release_date: NaiveDate,
    pub album_external_url: Option<String>,
    pub artists: String,
}

impl TrackRecord {
    /// The aggregated artist names, split back apart.
    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.artists.split(NAME_SEPARATOR)
    }

    /// Reshape the flattened row into the nested domain entity, revalidating
    /// at the boundary. The row carries a single aggregated name list; it
    /// serves both the track and its album.
    pub fn into_track(self) -> Result<Track, ValidationError> {
        let artists = self
            .artist_names()
            .map(Artist::new)
            .collect::<Result<Vec<_>, _>>()?;
        let isrc = Isrc::new(&self.isrc)?;
        let duration = Duration::from_seconds(self.duration)?;

        let mut album = Album::new(self.album_title, self.cover, self.release_date, artists.clone());
        if let Some(url) = self.album_external_url {
            album = album.with_external_url(url);
        }
        let album = album.with_id(self.album_id);

        let mut track =
            Track::new(isrc, self.title, duration, artists, album).with_br_enabled(self.br_enabled);
        if let Some(url) = self.external_url {
            track = track.with_external_url(url);
        }
        if let Some(url) = self.preview_url {
            track = track.with_preview_url(url);
        }
        Ok(track.with_id(self.id))
    }
}

/// Probe for a track by ISRC without joining, returning its id if present.
pub async fn find_track_id(conn: &mut SqliteConnection, isrc: &Isrc) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM tracks WHERE isrc = ?")
        .bind(isrc.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(row.map(|(id,)| id))
}

/// Load the full joined record for an ISRC: track row, owning album, and
/// aggregated artist names.
pub async fn get_track_by_isrc(
    conn: &mut SqliteConnection,
    isrc: &Isrc,
) -> sqlx::Result<Option<TrackRecord>> {
    sqlx::query_as::<_, TrackRecord>(&format!(
        "{JOINED_TRACK_SELECT} WHERE t.isrc = ? GROUP BY t.id"
    ))
    .bind(isrc.as_str())
    .fetch_optional(conn)
    .await
}

/// All tracks with album and aggregated artist names, ordered by title.
pub async fn list_tracks(conn: &mut SqliteConnection) -> sqlx::Result<Vec<TrackRecord>> {
    sqlx::query_as::<_, TrackRecord>(&format!(
        "{JOINED_TRACK_SELECT} GROUP BY t.id ORDER BY t.title ASC"
    ))
    .fetch_all(conn)
    .await
}

/// Insert a track row and return its id. Only scalar fields are written;
/// artists and album travel through their own tables. A duplicate ISRC is a
/// constraint error, not an upsert.
pub async fn insert_track(
    conn: &mut SqliteConnection,
    track: &Track,
    album_id: i64,
) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO tracks (isrc, title, duration, album_id, external_url, br_enabled, preview_url)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(track.isrc().as_str())
    .bind(track.title())
    .bind(track.duration().seconds())
    .bind(album_id)
    .bind(track.external_url())
    .bind(track.br_enabled())
    .bind(track.preview_url())
    .fetch_one(conn)
    .await?;

    Ok(row.0)
}

/// Link an artist to a track. Linking the same pair twice is a no-op.
pub async fn link_track_artist(
    conn: &mut SqliteConnection,
    track_id: i64,
    artist_id: i64,
) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO tracks_artists (track_id, artist_id) VALUES (?, ?) \
         ON CONFLICT(track_id, artist_id) DO NOTHING",
    )
    .bind(track_id)
    .bind(artist_id)
    .execute(conn)
    .await?;

    Ok(())
}
