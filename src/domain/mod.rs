//! Domain types for the storefront catalog.
//!
//! This module provides:
//! - Lossless price handling via Decimal wrapper
//! - Identifier primitives: CategoryId, ProductId, LanguageId, StoreId, TimeMs
//! - Category and product row types
//! - The explicit per-request CatalogContext

pub mod category;
pub mod context;
pub mod decimal;
pub mod primitives;
pub mod product;

pub use category::{Category, ChildGroup, ChildrenByParent, ParentSelector};
pub use context::CatalogContext;
pub use decimal::Decimal;
pub use primitives::{CategoryId, LanguageId, ProductId, StoreId, TimeMs};
pub use product::{PriceRow, ProductCard};
