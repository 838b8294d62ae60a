//! Catalog read operations for home-page cards.
//!
//! Each operation is request-scoped: it takes an explicit [`CatalogContext`],
//! awaits its queries in sequence and holds no state between calls.

use crate::db::Repository;
use crate::domain::{
    CatalogContext, Category, CategoryId, ChildrenByParent, Decimal, ParentSelector, ProductCard,
};
use crate::engine::{collapse_by_product, min_effective_price, newest_first, pick_random, CategoryTree};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Catalog {
    repo: Arc<Repository>,
}

impl Catalog {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Build the visible category tree for `ctx` from one bulk fetch.
    pub async fn load_tree(&self, ctx: &CatalogContext) -> Result<CategoryTree, sqlx::Error> {
        let categories = self.repo.visible_categories(ctx).await?;
        Ok(CategoryTree::from_categories(&categories))
    }

    /// Every visible descendant of `category_id`, deepest first. The category
    /// itself is not included.
    pub async fn resolve_subtree(
        &self,
        ctx: &CatalogContext,
        category_id: CategoryId,
    ) -> Result<Vec<CategoryId>, sqlx::Error> {
        let tree = self.load_tree(ctx).await?;
        let descendants = tree.descendants(category_id);
        debug!(category_id = %category_id, count = descendants.len(), "Resolved category subtree");
        Ok(descendants)
    }

    /// Lowest effective price in `category_id`, or `Decimal::zero()` when no
    /// price is available.
    ///
    /// Products linked directly to the category are tried first; only when
    /// there are none is the whole subtree searched.
    pub async fn min_price(
        &self,
        ctx: &CatalogContext,
        category_id: CategoryId,
    ) -> Result<Decimal, sqlx::Error> {
        let direct = self.repo.query_price_rows(ctx, &[category_id]).await?;
        if let Some(price) = min_effective_price(&direct) {
            debug!(category_id = %category_id, price = %price, "Min price from direct products");
            return Ok(price);
        }

        let scope = self.scope(ctx, category_id).await?;
        let rows = self.repo.query_price_rows(ctx, &scope).await?;
        let price = min_effective_price(&rows).unwrap_or_else(Decimal::zero);
        debug!(
            category_id = %category_id,
            categories = scope.len(),
            price = %price,
            "Min price from subtree"
        );
        Ok(price)
    }

    /// Discounted products in the subtree of `category_id`, one card per
    /// product, before random selection.
    pub async fn discounted_candidates(
        &self,
        ctx: &CatalogContext,
        category_id: CategoryId,
    ) -> Result<Vec<ProductCard>, sqlx::Error> {
        let scope = self.scope(ctx, category_id).await?;
        let rows = self.repo.query_discounted_rows(ctx, &scope).await?;
        Ok(collapse_by_product(rows))
    }

    /// Up to `limit` random products with an active special in the subtree of
    /// `category_id`.
    pub async fn random_discounted(
        &self,
        ctx: &CatalogContext,
        category_id: CategoryId,
        limit: usize,
    ) -> Result<Vec<ProductCard>, sqlx::Error> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let candidates = self.discounted_candidates(ctx, category_id).await?;
        debug!(category_id = %category_id, candidates = candidates.len(), limit, "Picking discounted products");
        Ok(pick_random(candidates, limit, &mut rand::rng()))
    }

    /// [`Catalog::random_discounted`] with a caller-supplied random source.
    pub async fn random_discounted_with_rng<R: Rng + ?Sized>(
        &self,
        ctx: &CatalogContext,
        category_id: CategoryId,
        limit: usize,
        rng: &mut R,
    ) -> Result<Vec<ProductCard>, sqlx::Error> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let candidates = self.discounted_candidates(ctx, category_id).await?;
        Ok(pick_random(candidates, limit, rng))
    }

    /// Up to `limit` most recently added products in the subtree of
    /// `category_id`, newest first.
    pub async fn newest(
        &self,
        ctx: &CatalogContext,
        category_id: CategoryId,
        limit: usize,
    ) -> Result<Vec<ProductCard>, sqlx::Error> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let scope = self.scope(ctx, category_id).await?;
        let rows = self.repo.query_newest_rows(ctx, &scope).await?;
        let cards = newest_first(collapse_by_product(rows), limit);
        debug!(category_id = %category_id, count = cards.len(), limit, "Listed newest products");
        Ok(cards)
    }

    /// Visible direct children for each selected parent, in one flat query.
    pub async fn children_of(
        &self,
        ctx: &CatalogContext,
        selector: impl Into<ParentSelector>,
    ) -> Result<ChildrenByParent, sqlx::Error> {
        let parents = selector.into().parent_ids();
        let children = self.repo.query_children(ctx, &parents).await?;
        Ok(ChildrenByParent::group(&parents, children))
    }

    /// Visible categories among `ids`, in the order they were requested.
    pub async fn categories_by_ids(
        &self,
        ctx: &CatalogContext,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, sqlx::Error> {
        let found = self.repo.query_categories_by_ids(ctx, ids).await?;

        let mut by_id: HashMap<CategoryId, Category> =
            found.into_iter().map(|c| (c.id, c)).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// `category_id` plus its visible descendants.
    async fn scope(
        &self,
        ctx: &CatalogContext,
        category_id: CategoryId,
    ) -> Result<Vec<CategoryId>, sqlx::Error> {
        let tree = self.load_tree(ctx).await?;
        Ok(tree.subtree(category_id))
    }
}
