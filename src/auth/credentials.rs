// Client credentials supplied at construction

use std::fmt;

use crate::error::{ApiError, Result};

/// OAuth2 client id and secret, immutable once built
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Validate and wrap a client id / secret pair
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.trim().is_empty() {
            return Err(ApiError::InvalidCredentials("client_id is empty".to_string()));
        }
        if client_secret.trim().is_empty() {
            return Err(ApiError::InvalidCredentials(
                "client_secret is empty".to_string(),
            ));
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

// Keep the secret out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let creds = Credentials::new("id", "secret").unwrap();
        assert_eq!(creds.client_id(), "id");
        assert_eq!(creds.client_secret(), "secret");
    }

    #[test]
    fn test_empty_client_id_rejected() {
        let err = Credentials::new("  ", "secret").unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials(_)));
        assert_eq!(err.to_string(), "Invalid credentials: client_id is empty");
    }

    #[test]
    fn test_empty_client_secret_rejected() {
        let err = Credentials::new("id", "").unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials(_)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let creds = Credentials::new("id", "super-secret").unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("id"));
        assert!(!debug.contains("super-secret"));
    }
}
