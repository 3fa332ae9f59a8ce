use async_trait::async_trait;
use boutique_core::RemoteCallError;
use boutique_proto::hipstershop::{PlaceOrderRequest, PlaceOrderResponse, Product};

/// Read side of the product catalog contract.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every product, in whatever order the catalog returns them.
    async fn list_products(&self) -> Result<Vec<Product>, RemoteCallError>;
}

/// Order placement against the checkout contract.
///
/// The cart is resolved server-side from `request.user_id`; no line items are sent. Calls are not
/// idempotent: each successful call may create a new order.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    async fn place_order(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<PlaceOrderResponse, RemoteCallError>;
}
