pub mod categories;
pub mod health;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::db::Repository;
use crate::error::AppError;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub catalog: Arc<Catalog>,
    pub config: Config,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        let catalog = Arc::new(Catalog::new(repo.clone()));
        Self {
            repo,
            catalog,
            config,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/categories", get(categories::get_categories))
        .route("/v1/categories/children", get(categories::get_children))
        .route("/v1/categories/:id/subtree", get(categories::get_subtree))
        .route("/v1/categories/:id/min-price", get(categories::get_min_price))
        .route("/v1/categories/:id/specials", get(categories::get_specials))
        .route("/v1/categories/:id/newest", get(categories::get_newest))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("No such route".into())
}
