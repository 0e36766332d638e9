use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Url;

use crate::error::ApiError;

/// Production gift card API host
pub const PRODUCTION_BASE_URL: &str = "https://giftcards.reloadly.com/";

/// Sandbox gift card API host
pub const SANDBOX_BASE_URL: &str = "https://giftcards-sandbox.reloadly.com/";

/// OAuth2 token endpoint shared by both environments
pub const AUTH_URL: &str = "https://auth.reloadly.com/oauth/token";

/// Client settings, fixed at construction
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Use the sandbox environment instead of production
    pub test_mode: bool,

    /// Version embedded in the Accept header of order requests
    pub api_version: u32,

    /// Total request timeout in seconds
    pub request_timeout: u64,

    /// Connect timeout in seconds
    pub connect_timeout: u64,

    /// Replaces the environment base URL (mock servers, proxies)
    pub base_url: Option<String>,

    /// Replaces the token endpoint URL
    pub auth_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            test_mode: false,
            api_version: 1,
            request_timeout: 30,
            connect_timeout: 10,
            base_url: None,
            auth_url: None,
        }
    }
}

impl ClientConfig {
    /// Sandbox configuration with defaults otherwise
    pub fn sandbox() -> Self {
        Self {
            test_mode: true,
            ..Self::default()
        }
    }

    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = Some(auth_url.into());
        self
    }

    /// Resolve the API base URL, always ending with `/`
    /// Also used as the OAuth2 `audience`
    pub fn resolve_base_url(&self) -> Result<String, ApiError> {
        let raw = match self.base_url.as_deref() {
            Some(url) => url,
            None if self.test_mode => SANDBOX_BASE_URL,
            None => PRODUCTION_BASE_URL,
        };

        let url = Url::parse(raw)
            .map_err(|e| ApiError::ConfigError(format!("invalid base URL {raw:?}: {e}")))?;

        let mut url = url.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        Ok(url)
    }

    /// Resolve the token endpoint URL
    pub fn resolve_auth_url(&self) -> Result<String, ApiError> {
        let raw = self.auth_url.as_deref().unwrap_or(AUTH_URL);
        Url::parse(raw)
            .map(|url| url.to_string())
            .map_err(|e| ApiError::ConfigError(format!("invalid auth URL {raw:?}: {e}")))
    }
}

/// Reloadly gift card command-line client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// OAuth2 client id
    #[arg(long, env = "RELOADLY_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "RELOADLY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Use the sandbox environment
    #[arg(short, long, env = "RELOADLY_SANDBOX")]
    pub sandbox: bool,

    /// API version used for order placement
    #[arg(long, env = "RELOADLY_API_VERSION", default_value = "1")]
    pub api_version: u32,

    /// HTTP request timeout in seconds
    #[arg(long, env = "RELOADLY_HTTP_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per API operation
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Account balance
    Balance,

    /// All countries where orders can be placed
    Countries,

    /// Country details by ISO code
    Country { iso_code: String },

    /// Product catalog
    Products {
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        product_name: Option<String>,
        #[arg(long)]
        country_code: Option<String>,
        #[arg(long)]
        include_range: Option<bool>,
        #[arg(long)]
        include_fixed: Option<bool>,
    },

    /// Product details by id
    Product { product_id: u64 },

    /// Products available in a country
    CountryProducts { iso_code: String },

    /// Redeem instructions, for every brand or a single one
    RedeemInstructions { brand_id: Option<u64> },

    /// Discounted products
    Discounts {
        #[arg(long, default_value = "200")]
        size: u32,
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Discount for a product
    Discount { product_id: u64 },

    /// Transaction report, or a single transaction
    Transactions { transaction_id: Option<u64> },

    /// Place a gift card order
    Order {
        #[arg(long)]
        product_id: u64,
        #[arg(long)]
        quantity: u32,
        #[arg(long)]
        unit_price: f64,
        #[arg(long)]
        sender_name: String,
        #[arg(long)]
        country_code: Option<String>,
        #[arg(long)]
        custom_identifier: Option<String>,
        #[arg(long)]
        recipient_email: Option<String>,
        /// Recipient phone country code, requires --recipient-phone
        #[arg(long, requires = "recipient_phone")]
        recipient_phone_country: Option<String>,
        #[arg(long, requires = "recipient_phone_country")]
        recipient_phone: Option<String>,
    },

    /// Redeem code of an ordered card
    RedeemCode { transaction_id: u64 },
}

/// Resolved binary configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub client: ClientConfig,
    pub log_level: String,
}

impl Config {
    /// Build configuration from parsed arguments (CLI > ENV > defaults)
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let client_id = args
            .client_id
            .clone()
            .context("RELOADLY_CLIENT_ID is required (use --client-id or set RELOADLY_CLIENT_ID)")?;

        let client_secret = args.client_secret.clone().context(
            "RELOADLY_CLIENT_SECRET is required (use --client-secret or set RELOADLY_CLIENT_SECRET)",
        )?;

        let client = ClientConfig {
            test_mode: args.sandbox,
            api_version: args.api_version,
            request_timeout: args.timeout,
            ..ClientConfig::default()
        };

        Ok(Self {
            client_id,
            client_secret,
            client,
            log_level: args.log_level.clone(),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.client.api_version == 0 {
            anyhow::bail!("RELOADLY_API_VERSION must be at least 1");
        }
        if self.client.request_timeout == 0 {
            anyhow::bail!("RELOADLY_HTTP_TIMEOUT must be at least 1 second");
        }
        Ok(())
    }
}
