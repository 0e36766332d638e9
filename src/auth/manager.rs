use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::Mutex;

use super::credentials::Credentials;
use super::refresh;
use super::types::BearerToken;
use crate::error::Result;

/// Token held by the manager together with its derived expiry
#[derive(Debug, Clone)]
struct CachedToken {
    token: BearerToken,

    /// `None` when the lifetime could not be turned into a timestamp
    expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// A token is reused until the current time reaches its expiry
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            None => true, // No expiration info, fetch unconditionally
            Some(exp) => now >= exp,
        }
    }
}

/// Bearer token manager
/// Fetches a token on first use and again once it has expired.
/// Refresh is serialized: concurrent callers wait on the in-flight fetch
/// and reuse its result.
pub struct TokenManager {
    /// Client id and secret
    credentials: Credentials,

    /// Token endpoint URL
    auth_url: String,

    /// OAuth2 audience, the API base URL
    audience: String,

    /// HTTP client for token requests
    client: Client,

    /// Current token, if any has been fetched
    current: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    /// Create a manager with no token; the first call fetches one
    pub fn new(
        client: Client,
        credentials: Credentials,
        auth_url: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            auth_url: auth_url.into(),
            audience: audience.into(),
            client,
            current: Mutex::new(None),
        }
    }

    /// Get a valid access token, fetching a new one if necessary
    pub async fn access_token(&self) -> Result<String> {
        // The lock is held across the fetch so only one refresh runs at a time
        let mut current = self.current.lock().await;

        if let Some(cached) = current.as_ref() {
            if !cached.is_expired_at(Utc::now()) {
                return Ok(cached.token.access_token.clone());
            }
            tracing::debug!("Bearer token expired, fetching a new one");
        } else {
            tracing::debug!("No bearer token yet, fetching one");
        }

        let (token, expires_at) = refresh::fetch_token(
            &self.client,
            &self.auth_url,
            &self.credentials,
            &self.audience,
        )
        .await
        .inspect_err(|e| tracing::error!(error_kind = e.kind(), "Token fetch failed: {}", e))?;

        let access_token = token.access_token.clone();
        *current = Some(CachedToken { token, expires_at });

        Ok(access_token)
    }

    /// Expiry of the current token, `None` if there is none or it has no expiry
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.current
            .lock()
            .await
            .as_ref()
            .and_then(|cached| cached.expires_at)
    }

    /// Whether a token has been fetched and is still valid
    pub async fn has_valid_token(&self) -> bool {
        self.current
            .lock()
            .await
            .as_ref()
            .is_some_and(|cached| !cached.is_expired_at(Utc::now()))
    }

    /// Drop the current token; the next call fetches a new one
    pub async fn invalidate(&self) {
        let mut current = self.current.lock().await;
        if current.take().is_some() {
            tracing::debug!("Bearer token invalidated");
        }
    }

    /// Token audience (API base URL)
    pub fn audience(&self) -> &str {
        &self.audience
    }

    #[cfg(test)]
    async fn set_token(&self, token: BearerToken, expires_at: Option<DateTime<Utc>>) {
        *self.current.lock().await = Some(CachedToken { token, expires_at });
    }
}
