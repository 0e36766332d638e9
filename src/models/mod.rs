// Request models for the gift card API
// Responses are returned as raw JSON and have no models here

pub mod order;
pub mod params;

pub use order::{OrderRequest, RecipientPhoneDetails};
pub use params::{DiscountParams, ProductsParams};
