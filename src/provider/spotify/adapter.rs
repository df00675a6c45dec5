//! Adapter layer: converts Spotify DTOs to domain entities
//!
//! This is the only place where wire types become domain types. An empty
//! result list is a well-formed "no match" and maps to `None`; a result
//! that lacks fields the catalog requires is a malformed response and
//! becomes an error instead of a half-populated track.

use chrono::NaiveDate;

use super::dto;
use crate::domain::{Album, Artist, Duration, Isrc, Track};
use crate::provider::ProviderError;

/// Convert a search response into the single best-match track.
///
/// Only the first result is considered. `region_market` is the market
/// whose presence in `available_markets` sets the regional-enablement
/// flag on the track.
pub fn to_track(
    response: dto::SearchResponse,
    region_market: &str,
) -> Result<Option<Track>, ProviderError> {
    let Some(page) = response.tracks else {
        return Ok(None);
    };
    let Some(item) = page.items.into_iter().next() else {
        return Ok(None);
    };

    let code = item
        .external_ids
        .isrc
        .ok_or(ProviderError::MissingField("external_ids.isrc"))?;
    let isrc = Isrc::new(&code)?;

    let album_dto = item
        .album
        .ok_or(ProviderError::MissingField("album"))?;
    let album = to_album(album_dto)?;

    if item.artists.is_empty() {
        return Err(ProviderError::MissingField("artists"));
    }
    let artists = item
        .artists
        .into_iter()
        .map(|a| Artist::new(a.name))
        .collect::<Result<Vec<_>, _>>()?;

    // Sub-second remainders are dropped
    let duration = Duration::from_seconds((item.duration_ms / 1000) as i64)?;
    let br_enabled = item
        .available_markets
        .iter()
        .any(|market| market == region_market);

    let mut track =
        Track::new(isrc, item.name, duration, artists, album).with_br_enabled(br_enabled);
    if let Some(url) = item.external_urls.spotify {
        track = track.with_external_url(url);
    }
    if let Some(url) = item.preview_url {
        track = track.with_preview_url(url);
    }

    Ok(Some(track))
}

fn to_album(album: dto::AlbumItem) -> Result<Album, ProviderError> {
    let cover = album
        .images
        .into_iter()
        .next()
        .map(|image| image.url)
        .ok_or(ProviderError::MissingField("album.images"))?;

    if album.artists.is_empty() {
        return Err(ProviderError::MissingField("album.artists"));
    }
    let artists = album
        .artists
        .into_iter()
        .map(|a| Artist::new(a.name))
        .collect::<Result<Vec<_>, _>>()?;

    let release_date = parse_release_date(&album.release_date)?;

    let mut domain_album = Album::new(album.name, cover, release_date, artists);
    if let Some(url) = album.external_urls.spotify {
        domain_album = domain_album.with_external_url(url);
    }
    Ok(domain_album)
}

/// Spotify truncates release dates to the precision it knows. Missing
/// parts resolve to the first month or day, so "2018-12" becomes
/// December 1st and "2018" becomes January 1st.
fn parse_release_date(raw: &str) -> Result<NaiveDate, ProviderError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Ok(date);
    }
    NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d")
        .map_err(|_| ProviderError::Parse(format!("unparseable release date {raw:?}")))
}
