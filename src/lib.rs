pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;

pub use catalog::Catalog;
pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    CatalogContext, Category, CategoryId, ChildrenByParent, Decimal, LanguageId, ParentSelector,
    ProductCard, ProductId, StoreId, TimeMs,
};
pub use engine::CategoryTree;
pub use error::AppError;
