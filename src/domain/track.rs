//! Track entity, the unit the whole catalog revolves around.

use serde::{Deserialize, Serialize};

use super::{Album, Artist, Duration, Isrc};

/// A recorded track, keyed by ISRC.
///
/// Serialized form is the flattened record the rest of the system exchanges:
/// artists collapse to their names, the album nests fully, storage ids are
/// omitted throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(skip_serializing, default)]
    id: Option<i64>,
    isrc: Isrc,
    title: String,
    duration: Duration,
    #[serde(serialize_with = "serialize_artist_names")]
    artists: Vec<Artist>,
    album: Album,
    #[serde(default)]
    external_url: Option<String>,
    #[serde(default)]
    br_enabled: bool,
    #[serde(default)]
    preview_url: Option<String>,
}

fn serialize_artist_names<S>(artists: &[Artist], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(artists.iter().map(Artist::name))
}

impl Track {
    pub fn new(
        isrc: Isrc,
        title: impl Into<String>,
        duration: Duration,
        artists: Vec<Artist>,
        album: Album,
    ) -> Self {
        Self {
            id: None,
            isrc,
            title: title.into(),
            duration,
            artists,
            album,
            external_url: None,
            br_enabled: false,
            preview_url: None,
        }
    }

    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.external_url = Some(url.into());
        self
    }

    pub fn with_br_enabled(mut self, enabled: bool) -> Self {
        self.br_enabled = enabled;
        self
    }

    pub fn with_preview_url(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    /// Attach the storage id assigned by the catalog.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace the artist list with resolved, persisted artists.
    pub fn with_artists(mut self, artists: Vec<Artist>) -> Self {
        self.artists = artists;
        self
    }

    /// Replace the album with its resolved, persisted version.
    pub fn with_album(mut self, album: Album) -> Self {
        self.album = album;
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn isrc(&self) -> &Isrc {
        &self.isrc
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn album(&self) -> &Album {
        &self.album
    }

    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref()
    }

    pub fn br_enabled(&self) -> bool {
        self.br_enabled
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview_url.as_deref()
    }
}
