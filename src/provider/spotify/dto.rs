//! Data Transfer Objects for Spotify API responses
//!
//! These structs mirror the wire format of the search and token endpoints.
//! Fields Spotify omits on some catalog entries are optional or defaulted
//! here; deciding whether an omission is acceptable is the adapter's job.

use serde::{Deserialize, Serialize};

/// Search response envelope. The `tracks` page is absent when the query
/// asked for other result types.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub tracks: Option<TrackPage>,
}

/// One page of track results.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<TrackItem>,
}

/// A single track result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackItem {
    pub name: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub external_ids: ExternalIds,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub artists: Vec<ArtistItem>,
    pub album: Option<AlbumItem>,
}

/// External identifiers attached to a track.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExternalIds {
    pub isrc: Option<String>,
}

/// Web links for an entry. Only the Spotify link is consumed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Artist credit on a track or album.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistItem {
    pub name: String,
}

/// Album an item belongs to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumItem {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    /// Truncated to the precision Spotify knows: "2018-12-07", "2018-12"
    /// or "2018".
    pub release_date: String,
    #[serde(default)]
    pub release_date_precision: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistItem>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// Cover art in one size. Images arrive widest first.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// Error envelope Spotify wraps failures in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

/// Client-credentials grant response from the accounts service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
