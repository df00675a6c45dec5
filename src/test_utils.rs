//! Test utilities and fixtures for isrc-minder tests.
//!
//! This module provides common test helpers, entity fixtures, and
//! database utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use isrc_minder::test_utils::{temp_db, sample_track};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let track = sample_track();
//!     // ... test logic
//! }
//! ```

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::domain::{Album, Artist, Duration, Isrc, Track};

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// # Returns
///
/// A tuple of (connection pool, temp directory handle).
/// Keep the TempDir alive for the duration of your test.
///
/// # Example
///
/// ```ignore
/// let (pool, _dir) = temp_db().await;
/// // Use pool for database operations
/// // Database is deleted when _dir goes out of scope
/// ```
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// A fully populated unsaved album.
pub fn sample_album() -> Album {
    Album::new(
        "Hill Climber",
        "https://i.scdn.co/image/ab67616d0000b273ad834bb9ded1ec2af1a23e07",
        NaiveDate::from_ymd_opt(2018, 12, 7).expect("fixture date must be valid"),
        vec![Artist::new("Vulfpeck").expect("fixture artist must be valid")],
    )
    .with_external_url("https://open.spotify.com/album/1W6BUzBTcyLTJdtZLbvZBN")
}

/// [`sample_album`] under a different title, for a distinct natural key.
pub fn sample_album_named(title: &str) -> Album {
    let base = sample_album();
    Album::new(
        title,
        base.cover(),
        base.release_date(),
        base.artists().to_vec(),
    )
}

/// A fully populated unsaved track, complete with album and artist credits.
pub fn sample_track() -> Track {
    Track::new(
        Isrc::new("US7VG1846811").expect("fixture ISRC must be well-formed"),
        "Darwin Derby",
        Duration::from_seconds(205).expect("fixture duration must be valid"),
        vec![
            Artist::new("Vulfpeck").expect("fixture artist must be valid"),
            Artist::new("Theo Katzman").expect("fixture artist must be valid"),
        ],
        sample_album(),
    )
    .with_external_url("https://open.spotify.com/track/2jbYvQCyPgX3CdmAzeVeuS")
    .with_br_enabled(true)
    .with_preview_url("https://p.scdn.co/mp3-preview/9aa6bbf48a2d8e09b7a9e09346e9b2a4cbf63f4f")
}

/// [`sample_track`] under a different ISRC, for a second row in the same
/// album.
pub fn sample_track_with_isrc(code: &str) -> Track {
    let base = sample_track();
    Track::new(
        Isrc::new(code).expect("fixture ISRC must be well-formed"),
        base.title(),
        base.duration(),
        base.artists().to_vec(),
        base.album().clone(),
    )
    .with_br_enabled(base.br_enabled())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;

        // Should be able to query
        let mut conn = pool.acquire().await.unwrap();
        let tracks = crate::db::tracks::list_tracks(&mut conn).await.unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_sample_track_is_complete() {
        let track = sample_track();
        assert_eq!(track.isrc().as_str(), "US7VG1846811");
        assert_eq!(track.duration().seconds(), 205);
        assert_eq!(track.artists().len(), 2);
        assert!(track.br_enabled());
        assert!(track.external_url().is_some());
        assert!(track.preview_url().is_some());
        assert!(track.id().is_none());

        let album = track.album();
        assert_eq!(album.title(), "Hill Climber");
        assert!(!album.artists().is_empty());
        assert!(album.external_url().is_some());
    }

    #[test]
    fn test_fixture_variants_change_only_the_key() {
        let renamed = sample_album_named("Mr Finish Line");
        assert_eq!(renamed.title(), "Mr Finish Line");
        assert_eq!(renamed.release_date(), sample_album().release_date());

        let recoded = sample_track_with_isrc("US7QQ1846811");
        assert_eq!(recoded.isrc().as_str(), "US7QQ1846811");
        assert_eq!(recoded.title(), sample_track().title());
        assert_eq!(recoded.album().key(), sample_track().album().key());
    }
}
