//! Visible category lookups.
//!
//! A category is visible when it is active, assigned to the context store and
//! has a description in the context language. All three lookups share that
//! filter and the sibling order `sort_order, LOWER(name)`.

use super::{placeholders, Repository, CHUNK_SIZE};
use crate::domain::{CatalogContext, Category, CategoryId};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const VISIBLE_CATEGORY_SELECT: &str = r#"
    SELECT c.category_id, c.parent_id, c.sort_order, cd.name
    FROM category c
    JOIN category_description cd
        ON cd.category_id = c.category_id AND cd.language_id = ?
    JOIN category_to_store c2s
        ON c2s.category_id = c.category_id AND c2s.store_id = ?
    WHERE c.status = 1
"#;

const SIBLING_ORDER: &str = "ORDER BY c.sort_order ASC, LOWER(cd.name) ASC, c.category_id ASC";

fn category_from_row(row: &SqliteRow) -> Category {
    Category {
        id: CategoryId::new(row.get("category_id")),
        parent_id: CategoryId::new(row.get("parent_id")),
        name: row.get("name"),
        sort_order: row.get("sort_order"),
    }
}

impl Repository {
    /// Every visible category, in sibling order.
    ///
    /// One bulk fetch; the category tree is built from this in memory.
    pub async fn visible_categories(
        &self,
        ctx: &CatalogContext,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let sql = format!("{} {}", VISIBLE_CATEGORY_SELECT, SIBLING_ORDER);
        let rows = sqlx::query(&sql)
            .bind(ctx.language_id.as_i64())
            .bind(ctx.store_id.as_i64())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    /// Visible direct children of any of `parents`, in sibling order per parent.
    pub async fn query_children(
        &self,
        ctx: &CatalogContext,
        parents: &[CategoryId],
    ) -> Result<Vec<Category>, sqlx::Error> {
        self.query_visible_where(ctx, "c.parent_id", parents).await
    }

    /// Visible categories whose id is in `ids`, in sibling order.
    pub async fn query_categories_by_ids(
        &self,
        ctx: &CatalogContext,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, sqlx::Error> {
        self.query_visible_where(ctx, "c.category_id", ids).await
    }

    async fn query_visible_where(
        &self,
        ctx: &CatalogContext,
        column: &str,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        for chunk in ids.chunks(CHUNK_SIZE) {
            let sql = format!(
                "{} AND {} IN ({}) {}",
                VISIBLE_CATEGORY_SELECT,
                column,
                placeholders(chunk.len()),
                SIBLING_ORDER
            );

            let mut query = sqlx::query(&sql)
                .bind(ctx.language_id.as_i64())
                .bind(ctx.store_id.as_i64());
            for id in chunk {
                query = query.bind(id.as_i64());
            }

            let rows = query.fetch_all(&self.pool).await?;
            out.extend(rows.iter().map(category_from_row));
        }

        Ok(out)
    }
}
