// Reloadly gift card client - library root

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http_client;
pub mod models;

pub use client::GiftCardClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http_client::{ApiResponse, RequestOptions};
pub use models::{DiscountParams, OrderRequest, ProductsParams, RecipientPhoneDetails};
