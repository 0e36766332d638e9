use serde::{Deserialize, Serialize};

// ==================================================================================================
// Order Models
// ==================================================================================================

/// Body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub product_id: u64,

    /// Country code of the card sender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// Number of cards to purchase
    pub quantity: u32,

    /// Face value of each card
    pub unit_price: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_identifier: Option<String>,

    pub sender_name: String,

    /// Address the card is emailed to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_phone_details: Option<RecipientPhoneDetails>,
}

impl OrderRequest {
    pub fn new(
        product_id: u64,
        quantity: u32,
        unit_price: f64,
        sender_name: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            country_code: None,
            quantity,
            unit_price,
            custom_identifier: None,
            sender_name: sender_name.into(),
            recipient_email: None,
            recipient_phone_details: None,
        }
    }

    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn with_custom_identifier(mut self, custom_identifier: impl Into<String>) -> Self {
        self.custom_identifier = Some(custom_identifier.into());
        self
    }

    pub fn with_recipient_email(mut self, recipient_email: impl Into<String>) -> Self {
        self.recipient_email = Some(recipient_email.into());
        self
    }

    pub fn with_recipient_phone(
        mut self,
        country_code: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        self.recipient_phone_details = Some(RecipientPhoneDetails {
            country_code: country_code.into(),
            phone_number: phone_number.into(),
        });
        self
    }
}

/// Phone details of the card recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientPhoneDetails {
    pub country_code: String,

    // Kept as text so leading zeros survive
    pub phone_number: String,
}
