//! Streaming-provider boundary.
//!
//! The catalog only ever talks to the provider through the [`StreamingApi`]
//! trait, which resolves a single best-match track for a query or an exact
//! ISRC. Production code uses the Spotify implementation in [`spotify`];
//! tests substitute the mock in [`mocks`].

pub mod spotify;

use async_trait::async_trait;

use crate::domain::{Isrc, Track, ValidationError};

/// Errors from the provider boundary. A well-formed "no match" response is
/// not an error; these cover transport failures and responses the adapter
/// judges invalid.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider authentication failed: {0}")]
    Auth(String),

    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse provider response: {0}")]
    Parse(String),

    #[error("rate limited - try again later")]
    RateLimited,

    #[error("provider response missing required field {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Free-form provider search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    query: String,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// The exact-match query form for an ISRC lookup.
    pub fn isrc(isrc: &Isrc) -> Self {
        Self::new(format!("isrc:{isrc}"))
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Capability to resolve tracks against the streaming provider.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait StreamingApi: Send + Sync {
    /// Resolve the single best-match track for a query, or absent when
    /// nothing matches.
    async fn search(&self, params: &SearchParams) -> Result<Option<Track>, ProviderError>;

    /// Resolve a track by exact ISRC.
    async fn search_by_isrc(&self, isrc: &Isrc) -> Result<Option<Track>, ProviderError>;
}

#[async_trait]
impl StreamingApi for spotify::SpotifyClient {
    async fn search(&self, params: &SearchParams) -> Result<Option<Track>, ProviderError> {
        self.search(params).await
    }

    async fn search_by_isrc(&self, isrc: &Isrc) -> Result<Option<Track>, ProviderError> {
        self.search_by_isrc(isrc).await
    }
}
