use serde::{Deserialize, Serialize};

/// Cart owner the checkout service resolves server-side. There is no per-user cart yet.
pub const CART_USER_ID: &str = "test-user";
pub const ORDER_CURRENCY: &str = "USD";
pub const SHIPPING_COUNTRY: &str = "USA";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: i32,
    pub country: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    pub number: String,
    pub expiration_month: i32,
    pub expiration_year: i32,
    pub cvv: i32,
}

impl std::fmt::Debug for PaymentCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentCard")
            .field("number", &"<redacted>")
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("cvv", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_id: String,
    pub user_currency: String,
    pub email: String,
    pub address: ShippingAddress,
    pub credit_card: PaymentCard,
}

/// Checkout fields collected from the shopper, before the fixed order context is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub email: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: i32,
    pub card: PaymentCard,
}

impl OrderRequest {
    pub fn for_checkout(details: CheckoutDetails) -> Self {
        Self {
            user_id: CART_USER_ID.to_string(),
            user_currency: ORDER_CURRENCY.to_string(),
            email: details.email,
            address: ShippingAddress {
                street_address: details.street_address,
                city: details.city,
                state: details.state,
                zip_code: details.zip_code,
                country: SHIPPING_COUNTRY.to_string(),
            },
            credit_card: details.card,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: String,
    pub shipping_tracking_id: String,
}
