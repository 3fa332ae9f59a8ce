use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::product::{Money, Product, ProductDetails};
use crate::errors::NormalizeError;

pub const NANOS_PER_UNIT: i32 = 1_000_000_000;
const NANOS_SCALE: u32 = 9;

pub fn money_to_decimal(money: &Money) -> Result<Decimal, NormalizeError> {
    if !(0..NANOS_PER_UNIT).contains(&money.nanos) {
        return Err(NormalizeError::InvalidPrice { units: money.units, nanos: money.nanos });
    }

    Ok(Decimal::from(money.units) + Decimal::new(i64::from(money.nanos), NANOS_SCALE))
}

/// Renders a price as `$<amount>` rounded to the nearest cent, always with two fraction digits.
pub fn format_price(money: &Money) -> Result<String, NormalizeError> {
    let amount = money_to_decimal(money)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Ok(format!("${amount:.2}"))
}

pub fn product_details(product: &Product) -> Result<ProductDetails, NormalizeError> {
    Ok(ProductDetails {
        name: product.name.clone(),
        description: product.description.clone(),
        price: format_price(&product.price)?,
        categories: product.categories.clone(),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{format_price, money_to_decimal, product_details};
    use crate::domain::product::{Money, Product};
    use crate::errors::NormalizeError;

    fn usd(units: i64, nanos: i32) -> Money {
        Money::new("USD", units, nanos)
    }

    #[test]
    fn formats_units_and_nanos_with_two_fraction_digits() {
        assert_eq!(format_price(&usd(19, 990_000_000)).as_deref(), Ok("$19.99"));
        assert_eq!(format_price(&usd(0, 500_000_000)).as_deref(), Ok("$0.50"));
        assert_eq!(format_price(&usd(5, 0)).as_deref(), Ok("$5.00"));
    }

    #[test]
    fn rounds_sub_cent_fractions_to_nearest_cent() {
        assert_eq!(format_price(&usd(1, 995_000_000)).as_deref(), Ok("$2.00"));
        assert_eq!(format_price(&usd(3, 994_999_999)).as_deref(), Ok("$3.99"));
        assert_eq!(format_price(&usd(0, 4_999_999)).as_deref(), Ok("$0.00"));
        assert_eq!(format_price(&usd(0, 5_000_000)).as_deref(), Ok("$0.01"));
    }

    #[test]
    fn large_unit_counts_keep_full_precision() {
        assert_eq!(
            format_price(&usd(1_234_567_890_123, 450_000_000)).as_deref(),
            Ok("$1234567890123.45")
        );
    }

    #[test]
    fn decimal_conversion_is_exact() {
        assert_eq!(money_to_decimal(&usd(67, 990_000_000)), Ok(Decimal::new(6799, 2)));
    }

    #[test]
    fn nanos_outside_range_are_rejected() {
        assert_eq!(
            format_price(&usd(1, 1_000_000_000)),
            Err(NormalizeError::InvalidPrice { units: 1, nanos: 1_000_000_000 })
        );
        assert_eq!(
            format_price(&usd(-1, -500_000_000)),
            Err(NormalizeError::InvalidPrice { units: -1, nanos: -500_000_000 })
        );
    }

    #[test]
    fn product_details_preserve_category_order_and_duplicates() {
        let product = Product {
            name: "Sunglasses".to_string(),
            description: "Add a modern touch to your outfits.".to_string(),
            price: usd(19, 990_000_000),
            categories: vec![
                "accessories".to_string(),
                "summer".to_string(),
                "accessories".to_string(),
            ],
        };

        let details = product_details(&product).expect("price should normalize");

        assert_eq!(details.price, "$19.99");
        assert_eq!(details.categories, vec!["accessories", "summer", "accessories"]);
        assert_eq!(details.name, "Sunglasses");
    }
}
