use serde::{Deserialize, Serialize};

/// Query parameters of `GET /products`, all optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsParams {
    /// Products per page
    pub size: Option<u32>,

    pub page: Option<u32>,

    pub product_name: Option<String>,

    /// ISO code of the country whose products are listed
    pub country_code: Option<String>,

    /// Include products with RANGE denomination
    pub include_range: Option<bool>,

    /// Include products with FIXED denomination
    pub include_fixed: Option<bool>,
}

impl ProductsParams {
    /// Query pairs for the parameters that are set, in declaration order
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(size) = self.size {
            query.push(("size", size.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(ref name) = self.product_name {
            query.push(("productName", name.clone()));
        }
        if let Some(ref country) = self.country_code {
            query.push(("countryCode", country.clone()));
        }
        if let Some(include_range) = self.include_range {
            query.push(("includeRange", include_range.to_string()));
        }
        if let Some(include_fixed) = self.include_fixed {
            query.push(("includeFixed", include_fixed.to_string()));
        }
        query
    }
}

/// Query parameters of `GET /discounts`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountParams {
    pub size: u32,
    pub page: u32,
}

impl DiscountParams {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![("size", self.size.to_string()), ("page", self.page.to_string())]
    }
}
