use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{Category, CategoryId, ProductCard};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ChildrenQuery {
    pub parents: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    pub ids: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinPriceResponse {
    pub category_id: i64,
    pub min_price: String,
    pub has_price: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtreeResponse {
    pub category_id: i64,
    pub descendant_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductCardDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardDto {
    pub product_id: i64,
    pub name: Option<String>,
    pub price: String,
    pub special: Option<String>,
    pub date_added: i64,
}

impl From<ProductCard> for ProductCardDto {
    fn from(card: ProductCard) -> Self {
        Self {
            product_id: card.id.as_i64(),
            name: card.name,
            price: card.price.to_canonical_string(),
            special: card.special.map(|s| s.to_canonical_string()),
            date_added: card.date_added.as_i64(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub category_id: i64,
    pub parent_id: i64,
    pub name: String,
    pub sort_order: i64,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.id.as_i64(),
            parent_id: category.parent_id.as_i64(),
            name: category.name,
            sort_order: category.sort_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildGroupDto {
    pub parent_id: i64,
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Serialize)]
pub struct ChildrenResponse {
    pub children: Vec<ChildGroupDto>,
}

pub async fn get_min_price(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MinPriceResponse>, AppError> {
    let category_id = parse_category_id(&id)?;
    let ctx = state.config.context();

    let price = state.catalog.min_price(&ctx, category_id).await?;

    Ok(Json(MinPriceResponse {
        category_id: category_id.as_i64(),
        min_price: price.to_canonical_string(),
        has_price: !price.is_zero(),
    }))
}

pub async fn get_subtree(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SubtreeResponse>, AppError> {
    let category_id = parse_category_id(&id)?;
    let ctx = state.config.context();

    let descendants = state.catalog.resolve_subtree(&ctx, category_id).await?;

    Ok(Json(SubtreeResponse {
        category_id: category_id.as_i64(),
        descendant_ids: descendants.iter().map(CategoryId::as_i64).collect(),
    }))
}

pub async fn get_specials(
    Path(id): Path<String>,
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let category_id = parse_category_id(&id)?;
    let limit = state.config.list_limit(params.limit);
    let ctx = state.config.context();

    let cards = state
        .catalog
        .random_discounted(&ctx, category_id, limit)
        .await?;

    Ok(Json(ProductsResponse {
        products: cards.into_iter().map(ProductCardDto::from).collect(),
    }))
}

pub async fn get_newest(
    Path(id): Path<String>,
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let category_id = parse_category_id(&id)?;
    let limit = state.config.list_limit(params.limit);
    let ctx = state.config.context();

    let cards = state.catalog.newest(&ctx, category_id, limit).await?;

    Ok(Json(ProductsResponse {
        products: cards.into_iter().map(ProductCardDto::from).collect(),
    }))
}

pub async fn get_children(
    Query(params): Query<ChildrenQuery>,
    State(state): State<AppState>,
) -> Result<Json<ChildrenResponse>, AppError> {
    let parents = parse_category_ids(&params.parents)?;
    let ctx = state.config.context();

    let grouped = state.catalog.children_of(&ctx, parents).await?;

    let children = grouped
        .into_groups()
        .into_iter()
        .map(|group| ChildGroupDto {
            parent_id: group.parent_id.as_i64(),
            categories: group.children.into_iter().map(CategoryDto::from).collect(),
        })
        .collect();

    Ok(Json(ChildrenResponse { children }))
}

pub async fn get_categories(
    Query(params): Query<CategoriesQuery>,
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let ids = parse_category_ids(&params.ids)?;
    let ctx = state.config.context();

    let categories = state.catalog.categories_by_ids(&ctx, &ids).await?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(CategoryDto::from).collect(),
    }))
}

/// Category ids must be non-negative integers; anything else is rejected
/// rather than coerced to the root category.
fn parse_category_id(raw: &str) -> Result<CategoryId, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 0)
        .map(CategoryId::new)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid category id: {}", raw)))
}

fn parse_category_ids(raw: &str) -> Result<Vec<CategoryId>, AppError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_category_id)
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(AppError::BadRequest("At least one category id is required".into()));
    }
    Ok(ids)
}
