//! Minimum effective price aggregation.

use crate::domain::{Decimal, PriceRow};

/// Lowest `min(price, special or price)` across `rows`, or `None` when there
/// are no rows.
///
/// Duplicate rows (a product joined through several categories or specials)
/// cannot change a minimum, so no grouping is needed here.
pub fn min_effective_price(rows: &[PriceRow]) -> Option<Decimal> {
    rows.iter().map(PriceRow::effective_price).min()
}
