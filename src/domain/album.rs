//! Album entity and its natural dedup key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Artist;

/// An album release.
///
/// Dedup happens on the natural key (title, release date); cover, external
/// URL and the artist list are payload and never part of identity. The
/// storage id is assigned on first persistence and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(skip_serializing, default)]
    id: Option<i64>,
    title: String,
    cover: String,
    release_date: NaiveDate,
    #[serde(default)]
    external_url: Option<String>,
    artists: Vec<Artist>,
}

impl Album {
    pub fn new(
        title: impl Into<String>,
        cover: impl Into<String>,
        release_date: NaiveDate,
        artists: Vec<Artist>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            cover: cover.into(),
            release_date,
            external_url: None,
            artists,
        }
    }

    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.external_url = Some(url.into());
        self
    }

    /// Attach the storage id assigned by the catalog.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace the artist list, used when resolved artists supersede the
    /// transient ones the album was built with.
    pub fn with_artists(mut self, artists: Vec<Artist>) -> Self {
        self.artists = artists;
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cover(&self) -> &str {
        &self.cover
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref()
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// The natural identity this album deduplicates on.
    pub fn key(&self) -> AlbumKey<'_> {
        AlbumKey {
            title: &self.title,
            release_date: self.release_date,
        }
    }
}

/// Natural identity of an album: exact title plus exact release date.
/// Distinct from the storage-assigned id, which only exists after persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlbumKey<'a> {
    pub title: &'a str,
    pub release_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_key_ignores_payload_differences() {
        let artists = vec![Artist::new("Vulfpeck").unwrap()];
        let a = Album::new("Hill Climber", "https://img/1.jpg", date(2018, 12, 7), artists.clone());
        let b = Album::new("Hill Climber", "https://img/other.jpg", date(2018, 12, 7), vec![])
            .with_external_url("https://open.spotify.com/album/x");
        assert_eq!(a.key(), b.key());

        let c = Album::new("Hill Climber", "https://img/1.jpg", date(2019, 12, 7), artists);
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_serializes_without_id() {
        let album = Album::new(
            "Discovery",
            "https://img/discovery.jpg",
            date(2001, 3, 12),
            vec![Artist::new("Daft Punk").unwrap().with_id(3)],
        )
        .with_id(9);

        let json = serde_json::to_value(&album).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Discovery",
                "cover": "https://img/discovery.jpg",
                "release_date": "2001-03-12",
                "external_url": null,
                "artists": [{ "name": "Daft Punk" }],
            })
        );
    }

    #[test]
    fn test_deserializes_artists_from_bare_names() {
        let album: Album = serde_json::from_value(serde_json::json!({
            "title": "Discovery",
            "cover": "https://img/discovery.jpg",
            "release_date": "2001-03-12",
            "artists": ["Daft Punk"],
        }))
        .unwrap();

        assert_eq!(album.artists().len(), 1);
        assert_eq!(album.artists()[0].name(), "Daft Punk");
        assert_eq!(album.external_url(), None);
        assert_eq!(album.id(), None);
    }
}
