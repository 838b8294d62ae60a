//! Grouping and ordering for product card listings.

use crate::domain::{ProductCard, ProductId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Collapse join rows to one card per product, keeping first-seen order.
///
/// When a product arrives with several specials (several active special rows,
/// or several category memberships), the lowest special is kept.
pub fn collapse_by_product(rows: Vec<ProductCard>) -> Vec<ProductCard> {
    let mut index: HashMap<ProductId, usize> = HashMap::with_capacity(rows.len());
    let mut cards: Vec<ProductCard> = Vec::with_capacity(rows.len());

    for row in rows {
        match index.get(&row.id) {
            Some(&pos) => {
                let card = &mut cards[pos];
                card.special = match (card.special, row.special) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
                if card.name.is_none() {
                    card.name = row.name;
                }
            }
            None => {
                index.insert(row.id, cards.len());
                cards.push(row);
            }
        }
    }

    cards
}

/// Shuffle `cards` with `rng` and keep at most `limit`.
pub fn pick_random<R: Rng + ?Sized>(
    mut cards: Vec<ProductCard>,
    limit: usize,
    rng: &mut R,
) -> Vec<ProductCard> {
    cards.shuffle(rng);
    cards.truncate(limit);
    cards
}

/// Order by `date_added` descending (ties by product id) and keep at most `limit`.
pub fn newest_first(mut cards: Vec<ProductCard>, limit: usize) -> Vec<ProductCard> {
    cards.sort_by(|a, b| b.date_added.cmp(&a.date_added).then(a.id.cmp(&b.id)));
    cards.truncate(limit);
    cards
}
