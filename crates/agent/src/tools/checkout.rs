use std::sync::Arc;

use async_trait::async_trait;
use boutique_core::{CheckoutDetails, OrderConfirmation, OrderRequest, PaymentCard, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{decode_args, Tool};
use crate::normalize;
use crate::services::CheckoutService;

/// Arguments accepted by `place_order`. Not `Debug`: it carries the raw card number.
#[derive(Clone, Deserialize)]
pub struct PlaceOrderArgs {
    pub email: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: i32,
    pub credit_card_number: String,
    #[serde(alias = "credit_card_expiration_month")]
    pub expiration_month: i32,
    #[serde(alias = "credit_card_expiration_year")]
    pub expiration_year: i32,
    #[serde(alias = "credit_card_cvv")]
    pub cvv: i32,
}

impl From<PlaceOrderArgs> for CheckoutDetails {
    fn from(args: PlaceOrderArgs) -> Self {
        Self {
            email: args.email,
            street_address: args.street_address,
            city: args.city,
            state: args.state,
            zip_code: args.zip_code,
            card: PaymentCard {
                number: args.credit_card_number,
                expiration_month: args.expiration_month,
                expiration_year: args.expiration_year,
                cvv: args.cvv,
            },
        }
    }
}

pub struct PlaceOrder {
    checkout: Arc<dyn CheckoutService>,
}

impl PlaceOrder {
    pub fn new(checkout: Arc<dyn CheckoutService>) -> Self {
        Self { checkout }
    }

    /// Submits one order for the shopper's cart. Not idempotent: every call reaches checkout.
    pub async fn run(&self, details: CheckoutDetails) -> ToolResult<OrderConfirmation> {
        let request = normalize::order_request(&OrderRequest::for_checkout(details));

        let response = match self.checkout.place_order(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    event_name = "tool.place_order.remote_error",
                    service = %error.service,
                    rejected = error.is_rejection(),
                    error = %error,
                    "checkout call failed"
                );
                return ToolResult::error(format!("Failed to place order: {error}"));
            }
        };

        match normalize::order_result(response) {
            Ok(order) => {
                info!(
                    event_name = "tool.place_order.success",
                    order_id = %order.order_id,
                    shipping_tracking_id = %order.shipping_tracking_id,
                    "order placed"
                );
                ToolResult::success(OrderConfirmation {
                    order_confirmation_id: order.order_id,
                    shipping_tracking_id: order.shipping_tracking_id,
                })
            }
            Err(error) => {
                warn!(
                    event_name = "tool.place_order.invalid_response",
                    error = %error,
                    "checkout response unusable"
                );
                ToolResult::error(format!("Failed to place order: {error}"))
            }
        }
    }
}

#[async_trait]
impl Tool for PlaceOrder {
    fn name(&self) -> &'static str {
        "place_order"
    }

    fn description(&self) -> &'static str {
        "Places an order for everything in the shopper's cart and returns the order \
         confirmation id and shipping tracking id. Every call creates a new order."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "email": {"type": "string", "description": "Shopper email for the order receipt."},
                "street_address": {"type": "string"},
                "city": {"type": "string"},
                "state": {"type": "string"},
                "zip_code": {"type": "integer"},
                "credit_card_number": {"type": "string"},
                "expiration_month": {"type": "integer", "description": "Card expiration month, 1-12."},
                "expiration_year": {"type": "integer", "description": "Card expiration year, four digits."},
                "cvv": {"type": "integer"}
            },
            "required": [
                "email",
                "street_address",
                "city",
                "state",
                "zip_code",
                "credit_card_number",
                "expiration_month",
                "expiration_year",
                "cvv"
            ]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult<Value> {
        match decode_args::<PlaceOrderArgs>(self.name(), input) {
            Ok(args) => self.run(args.into()).await.into_json(),
            Err(message) => ToolResult::error(message),
        }
    }
}
