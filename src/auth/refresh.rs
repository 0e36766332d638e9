// Token fetch logic

use chrono::{DateTime, Duration, Utc};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use super::credentials::Credentials;
use super::types::{BearerToken, TokenRequest, GRANT_TYPE};
use crate::error::{body_excerpt, ApiError, Result};

/// Seconds shaved off the advertised lifetime
const EXPIRY_SAFETY_MARGIN_SECS: i64 = 1;

/// Absolute expiry for a token fetched at `fetched_at`
/// Returns `None` when the lifetime does not fit a timestamp
pub fn derive_expiry(fetched_at: DateTime<Utc>, expires_in: u64) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(expires_in).ok()?;
    let lifetime = Duration::try_seconds(secs - EXPIRY_SAFETY_MARGIN_SECS)?;
    fetched_at.checked_add_signed(lifetime)
}

/// Request a new bearer token with the client-credentials grant
/// Does not touch any cached state; the caller stores the result
pub async fn fetch_token(
    client: &Client,
    auth_url: &str,
    credentials: &Credentials,
    audience: &str,
) -> Result<(BearerToken, Option<DateTime<Utc>>)> {
    tracing::debug!(url = %auth_url, audience = %audience, "Requesting bearer token");

    let request = TokenRequest {
        client_id: credentials.client_id(),
        client_secret: credentials.client_secret(),
        grant_type: GRANT_TYPE,
        audience,
    };

    let response = client
        .post(auth_url)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .json(&request)
        .send()
        .await?;

    let fetched_at = Utc::now();
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let excerpt = body_excerpt(&body);
        tracing::error!(
            status = status.as_u16(),
            body = %excerpt,
            "Token endpoint returned an error"
        );
        return Err(ApiError::AuthError(format!(
            "token endpoint returned {}: {}",
            status, excerpt
        )));
    }

    let token: BearerToken = serde_json::from_str(&body)
        .map_err(|e| ApiError::AuthError(format!("failed to parse token response: {}", e)))?;

    if token.access_token.is_empty() {
        return Err(ApiError::AuthError(
            "token response does not contain access_token".to_string(),
        ));
    }

    let expires_at = derive_expiry(fetched_at, token.expires_in);

    match expires_at {
        Some(exp) => tracing::info!(
            token_type = %token.token_type,
            scope = %token.scope,
            "Bearer token obtained, expires: {}",
            exp.to_rfc3339()
        ),
        None => tracing::warn!(
            expires_in = token.expires_in,
            "Bearer token lifetime out of range, it will be refetched on next use"
        ),
    }

    Ok((token, expires_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_derive_expiry_subtracts_one_second() {
        let t = Utc.with_ymd_and_hms(2025, 1, 12, 10, 0, 0).unwrap();
        let exp = derive_expiry(t, 3600).unwrap();
        assert_eq!(exp, t + Duration::seconds(3599));
    }

    #[test]
    fn test_derive_expiry_zero_lifetime_is_already_past() {
        let t = Utc.with_ymd_and_hms(2025, 1, 12, 10, 0, 0).unwrap();
        let exp = derive_expiry(t, 0).unwrap();
        assert!(exp < t);
    }

    #[test]
    fn test_derive_expiry_overflow_is_none() {
        let t = Utc::now();
        assert!(derive_expiry(t, u64::MAX).is_none());
        assert!(derive_expiry(t, i64::MAX as u64).is_none());
    }

    proptest! {
        #[test]
        fn prop_expiry_is_fetch_time_plus_lifetime_minus_one(
            base in 0i64..4_000_000_000,
            expires_in in 0u64..10_000_000,
        ) {
            let t = Utc.timestamp_opt(base, 0).unwrap();
            let exp = derive_expiry(t, expires_in).unwrap();
            prop_assert_eq!(exp.timestamp(), base + expires_in as i64 - 1);
        }
    }
}
