use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

use crate::auth::TokenManager;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

/// Accept header sent on every call except order placement
pub const DEFAULT_ACCEPT: &str = "application/com.reloadly.giftcards-v1+json";

/// Version-qualified Accept header used for order placement
pub fn versioned_accept(api_version: u32) -> String {
    format!("application/com.reloadly.giftcards-v{}+json", api_version)
}

/// Build the pooled HTTP client shared by token fetches and API calls
pub fn build_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .timeout(Duration::from_secs(config.request_timeout))
        .build()
        .map_err(|e| ApiError::ConfigError(format!("failed to create HTTP client: {}", e)))
}

/// Everything a single call may carry besides method and URL
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query string pairs, in order
    pub query: Vec<(&'static str, String)>,

    /// JSON body
    pub body: Option<Value>,

    /// Replaces the default Accept header when set
    /// Authorization is filled in from the current token unless already present
    pub headers: Option<HeaderMap>,
}

impl RequestOptions {
    pub fn query(query: Vec<(&'static str, String)>) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn json(body: Value, headers: HeaderMap) -> Self {
        Self {
            query: Vec::new(),
            body: Some(body),
            headers: Some(headers),
        }
    }
}

/// Decoded response body with the status it came with
/// API-level failures (4xx/5xx with a JSON payload) are returned here too
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `Authorization` header value for a bearer token
pub fn bearer_header(access_token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", access_token)).map_err(|_| {
        ApiError::AuthError("access token is not a valid header value".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// HTTP dispatch layer: one authenticated request per call, no retries
pub struct GiftCardHttpClient {
    /// Shared HTTP client with connection pooling
    client: Client,

    /// Bearer token lifecycle
    tokens: TokenManager,
}

impl GiftCardHttpClient {
    pub fn new(client: Client, tokens: TokenManager) -> Self {
        Self { client, tokens }
    }

    /// Perform one request and decode its JSON body
    ///
    /// The token is brought up to date exactly once per call. Without caller
    /// headers the default Accept and bearer Authorization headers are attached;
    /// caller headers are sent as given, with Authorization added from that
    /// same token when missing.
    pub async fn dispatch(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let access_token = self.tokens.access_token().await?;

        let headers = match options.headers {
            Some(headers) => with_authorization(headers, &access_token)?,
            None => default_headers(&access_token)?,
        };

        let mut request = self.client.request(method.clone(), url).headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(ref body) = options.body {
            request = request.json(body);
        }

        tracing::debug!(method = %method, url = %url, "Sending HTTP request");

        let response = request.send().await.inspect_err(|e| {
            tracing::warn!(error = %e, method = %method, url = %url, "HTTP request error");
        })?;

        let status = response.status();
        let final_url = response.url().to_string();
        tracing::debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            tracing::warn!(status = %status, url = %final_url, "Received error response");
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|e| ApiError::decode(&final_url, status.as_u16(), &text, e))?;

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }

    /// Token manager owned by this client
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }
}

/// Headers for every call that does not bring its own
fn default_headers(access_token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
    headers.insert(AUTHORIZATION, bearer_header(access_token)?);
    Ok(headers)
}

/// Caller headers plus the bearer token, unless they carry their own
fn with_authorization(mut headers: HeaderMap, access_token: &str) -> Result<HeaderMap> {
    if !headers.contains_key(AUTHORIZATION) {
        headers.insert(AUTHORIZATION, bearer_header(access_token)?);
    }
    Ok(headers)
}

/// Headers for order placement; Authorization is added at dispatch
pub fn order_headers(api_version: u32) -> Result<HeaderMap> {
    let accept = HeaderValue::from_str(&versioned_accept(api_version))
        .map_err(|e| ApiError::ConfigError(format!("invalid Accept header: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, accept);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_accept() {
        assert_eq!(versioned_accept(1), DEFAULT_ACCEPT);
        assert_eq!(
            versioned_accept(2),
            "application/com.reloadly.giftcards-v2+json"
        );
    }

    #[test]
    fn test_default_headers() {
        let headers = default_headers("abc").unwrap();
        assert_eq!(headers[ACCEPT], DEFAULT_ACCEPT);
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert!(!headers.contains_key(CONTENT_TYPE));
    }

    #[test]
    fn test_order_headers() {
        let headers = order_headers(3).unwrap();
        assert_eq!(headers[ACCEPT], "application/com.reloadly.giftcards-v3+json");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(!headers.contains_key(AUTHORIZATION));

        let headers = with_authorization(headers, "abc").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert_eq!(headers[ACCEPT], "application/com.reloadly.giftcards-v3+json");
    }

    #[test]
    fn test_caller_authorization_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer caller"));

        let headers = with_authorization(headers, "managed").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer caller");
    }

    #[test]
    fn test_bearer_header_rejects_control_chars() {
        let err = bearer_header("bad\ntoken").unwrap_err();
        assert!(matches!(err, ApiError::AuthError(_)));
    }

    #[test]
    fn test_api_response_success() {
        let ok = ApiResponse {
            status: 200,
            body: Value::Null,
        };
        let not_found = ApiResponse {
            status: 404,
            body: Value::Null,
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(&ClientConfig::default()).is_ok());
    }
}
