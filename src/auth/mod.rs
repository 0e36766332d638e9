// Authentication module
// Manages the OAuth2 client-credentials token lifecycle

mod credentials;
mod manager;
mod refresh;
mod types;

pub use credentials::Credentials;
pub use manager::TokenManager;
pub use refresh::{derive_expiry, fetch_token};
pub use types::{BearerToken, TokenRequest};
