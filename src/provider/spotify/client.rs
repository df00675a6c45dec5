//! Spotify Web API HTTP client
//!
//! Search endpoint reference:
//! https://developer.spotify.com/documentation/web-api/reference/search

use std::sync::Arc;

use tracing::debug;

use super::token::TokenProvider;
use super::{adapter, dto};
use crate::domain::{Isrc, Track};
use crate::provider::{ProviderError, SearchParams};

/// User agent for API requests
pub(super) const USER_AGENT: &str = concat!(
    "IsrcMinder/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/isrc-minder/isrc-minder)"
);

const DEFAULT_SEARCH_URL: &str = "https://api.spotify.com/v1/search";

/// Client for the Spotify search endpoint.
pub struct SpotifyClient {
    http_client: reqwest::Client,
    search_url: String,
    region_market: String,
    tokens: Arc<dyn TokenProvider>,
}

impl SpotifyClient {
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_search_url(DEFAULT_SEARCH_URL, tokens)
    }

    /// Create a client against a custom search endpoint.
    pub fn with_search_url(search_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            search_url: search_url.into(),
            region_market: "BR".to_string(),
            tokens,
        }
    }

    /// Override the market consulted for the regional-enablement flag.
    pub fn with_region_market(mut self, market: impl Into<String>) -> Self {
        self.region_market = market.into();
        self
    }

    /// Resolve the single best-match track for a query.
    pub async fn search(&self, params: &SearchParams) -> Result<Option<Track>, ProviderError> {
        let response = self.send_search_request(params).await?;
        adapter::to_track(response, &self.region_market)
    }

    /// Resolve a track by exact ISRC.
    pub async fn search_by_isrc(&self, isrc: &Isrc) -> Result<Option<Track>, ProviderError> {
        self.search(&SearchParams::isrc(isrc)).await
    }

    async fn send_search_request(
        &self,
        params: &SearchParams,
    ) -> Result<dto::SearchResponse, ProviderError> {
        let token = self.tokens.bearer_token().await?;
        let url = format!(
            "{}?type=track&q={}",
            self.search_url,
            urlencoding::encode(params.query())
        );
        debug!("Searching provider: {}", params.query());

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Auth(format!("search returned HTTP {status}")));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            // Spotify wraps failures in a JSON envelope; fall back to the
            // status line when the body is something else
            let message = match response.json::<dto::ApiErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => status.canonical_reason().unwrap_or("Unknown").to_string(),
            };
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}
