//! Product rows scoped to category sets.
//!
//! These return raw join rows: a product linked through several categories,
//! or with several active specials, appears more than once. Aggregation and
//! grouping happen in `crate::engine` with lossless decimals.

use super::{parse_price, placeholders, Repository, CHUNK_SIZE};
use crate::domain::{CatalogContext, CategoryId, Decimal, PriceRow, ProductCard, ProductId, TimeMs};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// A special is active when `date_start <= now <= date_end`.
const ACTIVE_SPECIAL: &str = "ps.product_id = p.product_id AND ps.date_start <= ? AND ps.date_end >= ?";

/// Prices are selected as `CAST(.. AS TEXT)` so NUMERIC/REAL storefront
/// columns decode the same way as TEXT ones.
const PRICE_COLUMNS: &str = "CAST(p.price AS TEXT) AS price, CAST(ps.price AS TEXT) AS special";

/// Product id, price and optional special from a joined row.
///
/// `None` when the stored price is missing or does not parse; an unparseable
/// special is treated as no special.
fn prices_from_row(row: &SqliteRow) -> Option<(ProductId, Decimal, Option<Decimal>)> {
    let product_id: i64 = row.get("product_id");
    let price: Option<String> = row.get("price");
    let special: Option<String> = row.get("special");

    let price = parse_price(price.as_deref().unwrap_or(""), "price", product_id)?;
    let special = special.and_then(|s| parse_price(&s, "special", product_id));
    Some((ProductId::new(product_id), price, special))
}

fn card_from_row(row: &SqliteRow) -> Option<ProductCard> {
    let (id, price, special) = prices_from_row(row)?;

    Some(ProductCard {
        id,
        price,
        special,
        name: row.get("name"),
        date_added: TimeMs::new(row.get("date_added")),
    })
}

impl Repository {
    /// Price rows for active products in active categories among `categories`.
    ///
    /// `special` is the active special price, if any. Rows whose stored price
    /// does not parse are dropped.
    pub async fn query_price_rows(
        &self,
        ctx: &CatalogContext,
        categories: &[CategoryId],
    ) -> Result<Vec<PriceRow>, sqlx::Error> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        for chunk in categories.chunks(CHUNK_SIZE) {
            let sql = format!(
                r#"
                SELECT p.product_id, {}
                FROM product_to_category p2c
                JOIN category c ON c.category_id = p2c.category_id
                JOIN product p ON p.product_id = p2c.product_id
                LEFT JOIN product_special ps ON {}
                WHERE p2c.category_id IN ({}) AND c.status = 1 AND p.status = 1
                "#,
                PRICE_COLUMNS,
                ACTIVE_SPECIAL,
                placeholders(chunk.len())
            );

            let mut query = sqlx::query(&sql)
                .bind(ctx.now.as_i64())
                .bind(ctx.now.as_i64());
            for id in chunk {
                query = query.bind(id.as_i64());
            }

            let rows = query.fetch_all(&self.pool).await?;
            out.extend(rows.iter().filter_map(prices_from_row).map(
                |(product_id, price, special)| PriceRow {
                    product_id,
                    price,
                    special,
                },
            ));
        }

        Ok(out)
    }

    /// Card rows for active products that have an active special.
    pub async fn query_discounted_rows(
        &self,
        ctx: &CatalogContext,
        categories: &[CategoryId],
    ) -> Result<Vec<ProductCard>, sqlx::Error> {
        self.query_card_rows(ctx, categories, "JOIN", "").await
    }

    /// Card rows for active products, newest first; the special is optional.
    pub async fn query_newest_rows(
        &self,
        ctx: &CatalogContext,
        categories: &[CategoryId],
    ) -> Result<Vec<ProductCard>, sqlx::Error> {
        self.query_card_rows(
            ctx,
            categories,
            "LEFT JOIN",
            "ORDER BY p.date_added DESC, p.product_id ASC",
        )
        .await
    }

    async fn query_card_rows(
        &self,
        ctx: &CatalogContext,
        categories: &[CategoryId],
        special_join: &str,
        order_by: &str,
    ) -> Result<Vec<ProductCard>, sqlx::Error> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        for chunk in categories.chunks(CHUNK_SIZE) {
            let sql = format!(
                r#"
                SELECT p.product_id, p.date_added, {}, pd.name
                FROM product_to_category p2c
                JOIN category c ON c.category_id = p2c.category_id
                JOIN product p ON p.product_id = p2c.product_id
                {} product_special ps ON {}
                LEFT JOIN product_description pd
                    ON pd.product_id = p.product_id AND pd.language_id = ?
                WHERE p2c.category_id IN ({}) AND c.status = 1 AND p.status = 1
                {}
                "#,
                PRICE_COLUMNS,
                special_join,
                ACTIVE_SPECIAL,
                placeholders(chunk.len()),
                order_by
            );

            let mut query = sqlx::query(&sql)
                .bind(ctx.now.as_i64())
                .bind(ctx.now.as_i64())
                .bind(ctx.language_id.as_i64());
            for id in chunk {
                query = query.bind(id.as_i64());
            }

            let rows = query.fetch_all(&self.pool).await?;
            out.extend(rows.iter().filter_map(card_from_row));
        }

        Ok(out)
    }
}
