//! Product price rows and listing cards.

use super::decimal::Decimal;
use super::primitives::{ProductId, TimeMs};

/// One joined (product, category, special) row used for price aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRow {
    pub product_id: ProductId,
    pub price: Decimal,
    pub special: Option<Decimal>,
}

impl PriceRow {
    /// `min(price, special or price)`.
    pub fn effective_price(&self) -> Decimal {
        match self.special {
            Some(special) => self.price.min(special),
            None => self.price,
        }
    }
}

/// A product as shown on a home-page card.
///
/// Join rows from the listing queries share this shape; the engine collapses
/// them to one card per product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub price: Decimal,
    pub special: Option<Decimal>,
    pub name: Option<String>,
    pub date_added: TimeMs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn row(price: &str, special: Option<&str>) -> PriceRow {
        PriceRow {
            product_id: ProductId::new(1),
            price: Decimal::from_str(price).unwrap(),
            special: special.map(|s| Decimal::from_str(s).unwrap()),
        }
    }

    #[test]
    fn test_effective_price_prefers_lower_special() {
        assert_eq!(row("10", Some("7")).effective_price().to_string(), "7");
    }

    #[test]
    fn test_effective_price_ignores_higher_special() {
        assert_eq!(row("10", Some("12")).effective_price().to_string(), "10");
    }

    #[test]
    fn test_effective_price_without_special() {
        assert_eq!(row("10.50", None).effective_price().to_string(), "10.5");
    }
}
