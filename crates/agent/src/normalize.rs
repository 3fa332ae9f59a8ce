//! Wire <-> domain conversions. Everything here is pure.

use boutique_core::pricing;
use boutique_core::{Money, NormalizeError, OrderRequest, OrderResult, Product, ProductDetails};
use boutique_proto::hipstershop;

/// An absent price decodes as zero money, matching the protobuf default.
pub fn money(wire: Option<&hipstershop::Money>) -> Money {
    wire.map(|money| Money::new(money.currency_code.clone(), money.units, money.nanos))
        .unwrap_or_default()
}

pub fn product(wire: &hipstershop::Product) -> Product {
    Product {
        name: wire.name.clone(),
        description: wire.description.clone(),
        price: money(wire.price_usd.as_ref()),
        categories: wire.categories.clone(),
    }
}

pub fn product_details(wire: &hipstershop::Product) -> Result<ProductDetails, NormalizeError> {
    pricing::product_details(&product(wire))
}

pub fn product_names(wire: &[hipstershop::Product]) -> Vec<String> {
    wire.iter().map(|product| product.name.clone()).collect()
}

pub fn order_request(request: &OrderRequest) -> hipstershop::PlaceOrderRequest {
    hipstershop::PlaceOrderRequest {
        user_id: request.user_id.clone(),
        user_currency: request.user_currency.clone(),
        email: request.email.clone(),
        address: Some(hipstershop::Address {
            street_address: request.address.street_address.clone(),
            city: request.address.city.clone(),
            state: request.address.state.clone(),
            country: request.address.country.clone(),
            zip_code: request.address.zip_code,
        }),
        credit_card: Some(hipstershop::CreditCardInfo {
            credit_card_number: request.credit_card.number.clone(),
            credit_card_cvv: request.credit_card.cvv,
            credit_card_expiration_year: request.credit_card.expiration_year,
            credit_card_expiration_month: request.credit_card.expiration_month,
        }),
    }
}

pub fn order_result(
    response: hipstershop::PlaceOrderResponse,
) -> Result<OrderResult, NormalizeError> {
    let order = response.order.ok_or(NormalizeError::MissingOrder)?;
    Ok(OrderResult { order_id: order.order_id, shipping_tracking_id: order.shipping_tracking_id })
}

#[cfg(test)]
mod tests {
    use boutique_core::{CheckoutDetails, NormalizeError, OrderRequest, PaymentCard};
    use boutique_proto::hipstershop;

    use super::{order_request, order_result, product_details, product_names};

    fn wire_product(name: &str, units: i64, nanos: i32) -> hipstershop::Product {
        hipstershop::Product {
            id: format!("id-{name}"),
            name: name.to_string(),
            description: format!("{name} description"),
            picture: String::new(),
            price_usd: Some(hipstershop::Money {
                currency_code: "USD".to_string(),
                units,
                nanos,
            }),
            categories: vec!["kitchen".to_string()],
        }
    }

    #[test]
    fn product_details_format_price() {
        let details =
            product_details(&wire_product("Mug", 8, 990_000_000)).expect("price should normalize");

        assert_eq!(details.name, "Mug");
        assert_eq!(details.description, "Mug description");
        assert_eq!(details.price, "$8.99");
        assert_eq!(details.categories, vec!["kitchen"]);
    }

    #[test]
    fn missing_price_renders_as_zero() {
        let mut product = wire_product("Sample", 0, 0);
        product.price_usd = None;

        let details = product_details(&product).expect("missing price should normalize");
        assert_eq!(details.price, "$0.00");
    }

    #[test]
    fn names_keep_remote_order() {
        let products = vec![wire_product("Watch", 1, 0), wire_product("Anklet", 2, 0)];
        assert_eq!(product_names(&products), vec!["Watch", "Anklet"]);
    }

    #[test]
    fn order_request_maps_every_field() {
        let request = OrderRequest::for_checkout(CheckoutDetails {
            email: "shopper@example.com".to_string(),
            street_address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: 62701,
            card: PaymentCard {
                number: "4111111111111111".to_string(),
                expiration_month: 12,
                expiration_year: 2031,
                cvv: 123,
            },
        });

        let wire = order_request(&request);
        let address = wire.address.expect("address should be set");
        let card = wire.credit_card.expect("card should be set");

        assert_eq!(wire.user_id, "test-user");
        assert_eq!(wire.user_currency, "USD");
        assert_eq!(wire.email, "shopper@example.com");
        assert_eq!(address.country, "USA");
        assert_eq!(address.zip_code, 62701);
        assert_eq!(address.city, "Springfield");
        assert_eq!(card.credit_card_number, "4111111111111111");
        assert_eq!(card.credit_card_expiration_month, 12);
        assert_eq!(card.credit_card_expiration_year, 2031);
        assert_eq!(card.credit_card_cvv, 123);
    }

    #[test]
    fn order_result_requires_order() {
        assert_eq!(
            order_result(hipstershop::PlaceOrderResponse { order: None }),
            Err(NormalizeError::MissingOrder)
        );

        let result = order_result(hipstershop::PlaceOrderResponse {
            order: Some(hipstershop::OrderResult {
                order_id: "ord-42".to_string(),
                shipping_tracking_id: "TRK-42".to_string(),
                ..hipstershop::OrderResult::default()
            }),
        })
        .expect("order should normalize");

        assert_eq!(result.order_id, "ord-42");
        assert_eq!(result.shipping_tracking_id, "TRK-42");
    }
}
