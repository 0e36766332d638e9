// Authentication types

use serde::{Deserialize, Serialize};

/// OAuth2 grant used for every token request
pub const GRANT_TYPE: &str = "client_credentials";

/// Token endpoint response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BearerToken {
    pub access_token: String,

    /// Lifetime in seconds, counted from the fetch
    pub expires_in: u64,

    #[serde(default)]
    pub scope: String,

    #[serde(default)]
    pub token_type: String,
}

/// Client-credentials token request body
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub grant_type: &'static str,
    pub audience: &'a str,
}
