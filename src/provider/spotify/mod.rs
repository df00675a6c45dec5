//! Spotify Web API integration
//!
//! Resolves tracks by ISRC through the search endpoint, authenticating with
//! the OAuth client-credentials grant. Only metadata Spotify exposes publicly
//! is consumed; no user-scoped endpoints are touched.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod dto;
mod adapter;
mod client;
mod token;

pub use adapter::to_track;
pub use client::SpotifyClient;
pub use token::{ClientCredentialsTokenSource, TokenProvider};
