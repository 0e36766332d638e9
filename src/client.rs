// Gift card API client
// One method per endpoint, each a single dispatch over the shared HTTP layer

use reqwest::Method;
use serde_json::Value;
use std::fmt::Display;

use crate::auth::{Credentials, TokenManager};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http_client::{self, ApiResponse, GiftCardHttpClient, RequestOptions};
use crate::models::{DiscountParams, OrderRequest, ProductsParams};

/// Reloadly gift card API client
pub struct GiftCardClient {
    http: GiftCardHttpClient,
    base_url: String,
    api_version: u32,
}

impl GiftCardClient {
    /// Create a client with default configuration (production, API v1)
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        Self::with_config(client_id, client_secret, ClientConfig::default())
    }

    /// Create a client; no network call happens until the first operation
    pub fn with_config(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let credentials = Credentials::new(client_id, client_secret)?;
        let base_url = config.resolve_base_url()?;
        let auth_url = config.resolve_auth_url()?;
        let client = http_client::build_client(&config)?;

        tracing::debug!(
            base_url = %base_url,
            api_version = config.api_version,
            sandbox = config.test_mode,
            "Gift card client configured"
        );

        let tokens = TokenManager::new(client.clone(), credentials, auth_url, base_url.clone());

        Ok(Self {
            http: GiftCardHttpClient::new(client, tokens),
            base_url,
            api_version: config.api_version,
        })
    }

    /// Base URL every endpoint path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> u32 {
        self.api_version
    }

    /// Token manager, for inspection or forced refresh
    pub fn tokens(&self) -> &TokenManager {
        self.http.tokens()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Authenticated request to `endpoint`, returning status and body
    pub async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        self.http.dispatch(method, &self.url(endpoint), options).await
    }

    async fn get(&self, endpoint: &str) -> Result<Value> {
        self.get_with_query(endpoint, Vec::new()).await
    }

    async fn get_with_query(
        &self,
        endpoint: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<Value> {
        let response = self
            .dispatch(Method::GET, endpoint, RequestOptions::query(query))
            .await?;
        Ok(response.body)
    }

    /// Account balance
    pub async fn balance(&self) -> Result<Value> {
        self.get("accounts/balance").await
    }

    /// Every country where a gift card order can be made
    pub async fn countries(&self) -> Result<Value> {
        self.get("countries").await
    }

    /// Country details by ISO code
    pub async fn country_by_iso_code(&self, iso_code: &str) -> Result<Value> {
        self.get(&format!("countries/{}", path_segment(iso_code)?))
            .await
    }

    /// Gift card products, filtered and paged by `params`
    pub async fn products(&self, params: &ProductsParams) -> Result<Value> {
        self.get_with_query("products", params.query()).await
    }

    pub async fn product_by_id(&self, product_id: u64) -> Result<Value> {
        self.get(&format!("products/{}", product_id)).await
    }

    /// Products available in the country with this ISO code
    pub async fn products_by_iso_code(&self, iso_code: &str) -> Result<Value> {
        self.get(&format!("countries/{}/products", path_segment(iso_code)?))
            .await
    }

    /// Redeem instructions for every brand
    pub async fn redeem_instructions(&self) -> Result<Value> {
        self.get("redeem-instructions").await
    }

    pub async fn redeem_instructions_by_id(&self, brand_id: u64) -> Result<Value> {
        self.get(&format!("redeem-instructions/{}", brand_id)).await
    }

    /// Products offering discounts, one page
    pub async fn discounts(&self, size: u32, page: u32) -> Result<Value> {
        self.get_with_query("discounts", DiscountParams { size, page }.query())
            .await
    }

    pub async fn discount_by_id(&self, product_id: u64) -> Result<Value> {
        self.get(&format!("products/{}/discounts", product_id)).await
    }

    /// Every gift card purchased by the account
    pub async fn transactions(&self) -> Result<Value> {
        self.get("reports/transactions").await
    }

    pub async fn transaction_by_id(&self, transaction_id: u64) -> Result<Value> {
        self.get(&format!("reports/transactions/{}", transaction_id))
            .await
    }

    /// Place a gift card order
    /// Uses the configured API version in the Accept header
    pub async fn order(&self, order: &OrderRequest) -> Result<Value> {
        let headers = http_client::order_headers(self.api_version)?;

        let body = serde_json::to_value(order)
            .map_err(|e| ApiError::ValidationError(format!("failed to encode order: {}", e)))?;

        tracing::info!(
            product_id = order.product_id,
            quantity = order.quantity,
            "Placing gift card order"
        );

        let response = self
            .dispatch(Method::POST, "orders", RequestOptions::json(body, headers))
            .await?;
        Ok(response.body)
    }

    /// Redeem code details for an ordered card
    pub async fn redeem_code(&self, transaction_id: u64) -> Result<Value> {
        self.get(&format!("orders/transactions/{}/cards", transaction_id))
            .await
    }
}

/// Reject path parameters that would change the request path
fn path_segment<T: Display>(value: T) -> Result<String> {
    let segment = value.to_string();
    if segment.is_empty() || segment.contains(['/', '?', '#']) {
        return Err(ApiError::ValidationError(format!(
            "invalid path parameter: {:?}",
            segment
        )));
    }
    Ok(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_credentials() {
        let err = GiftCardClient::new("", "secret").err().unwrap();
        assert!(matches!(err, ApiError::InvalidCredentials(_)));
    }

    #[test]
    fn test_base_url_selection() {
        let client = GiftCardClient::new("id", "secret").unwrap();
        assert_eq!(client.base_url(), "https://giftcards.reloadly.com/");
        assert_eq!(client.tokens().audience(), client.base_url());

        let sandbox = GiftCardClient::with_config("id", "secret", ClientConfig::sandbox()).unwrap();
        assert_eq!(sandbox.base_url(), "https://giftcards-sandbox.reloadly.com/");
        assert_eq!(sandbox.api_version(), 1);
    }

    #[test]
    fn test_url_join() {
        let client = GiftCardClient::new("id", "secret").unwrap();
        assert_eq!(
            client.url("countries/US"),
            "https://giftcards.reloadly.com/countries/US"
        );
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment("US").unwrap(), "US");
        assert!(path_segment("").is_err());
        assert!(path_segment("US/products").is_err());
        assert!(path_segment("US?x=1").is_err());
    }
}
