//! OAuth client-credentials token source
//!
//! The Web API authenticates with short-lived bearer tokens issued by the
//! accounts service. Tokens are cached and reused until shortly before
//! expiry, so a batch of lookups performs at most one grant round-trip.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::dto;
use crate::provider::ProviderError;

/// Leeway before expiry at which a cached token is considered stale
const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// Capability to produce a bearer token valid for the next request.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn bearer_token(&self) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_stale(&self, margin: Duration) -> bool {
        Instant::now() + margin >= self.expires_at
    }
}

/// Token source performing the client-credentials grant against the
/// accounts service.
pub struct ClientCredentialsTokenSource {
    http_client: reqwest::Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
    refresh_margin: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsTokenSource {
    pub fn new(
        auth_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(super::client::USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            auth_url: auth_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_margin: DEFAULT_REFRESH_MARGIN,
            cached: Mutex::new(None),
        }
    }

    /// Override how long before expiry a cached token is refreshed.
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    async fn request_token(&self) -> Result<CachedToken, ProviderError> {
        let response = self
            .http_client
            .post(&self.auth_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!(
                "token request returned HTTP {status}: {body}"
            )));
        }

        let token: dto::TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsTokenSource {
    async fn bearer_token(&self) -> Result<String, ProviderError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if !token.is_stale(self.refresh_margin) {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }
}
