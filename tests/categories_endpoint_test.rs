use axum::http::StatusCode;
use homecards::api::{self, AppState};
use homecards::config::Config;
use homecards::db::init_db;
use homecards::{LanguageId, Repository, StoreId};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    repo: Arc<Repository>,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("catalog.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));

    let config = Config {
        port: 0,
        database_path: db_path,
        language_id: LanguageId(1),
        store_id: StoreId(0),
        default_list_limit: 2,
        max_list_limit: 10,
    };

    let app = api::create_router(AppState::new(repo.clone(), config));

    TestApp {
        app,
        repo,
        _temp: temp_dir,
    }
}

async fn seed(repo: &Repository) {
    // 1 Electronics -> {2 Phones, 3 Laptops}; product 10 in 2, 11 and 12 in 3.
    // Specials run from 0 to far in the future so they are active "now".
    let statements = [
        "INSERT INTO category (category_id, parent_id, sort_order, status) VALUES (1, 0, 0, 1), (2, 1, 1, 1), (3, 1, 0, 1)",
        "INSERT INTO category_description (category_id, language_id, name) VALUES (1, 1, 'Electronics'), (2, 1, 'Phones'), (3, 1, 'Laptops')",
        "INSERT INTO category_to_store (category_id, store_id) VALUES (1, 0), (2, 0), (3, 0)",
        "INSERT INTO product (product_id, price, status, date_added) VALUES (10, '499.00', 1, 1000), (11, '1299.99', 1, 3000), (12, '899', 1, 2000)",
        "INSERT INTO product_description (product_id, language_id, name) VALUES (10, 1, 'Phone X'), (11, 1, 'Laptop Pro'), (12, 1, 'Laptop Air')",
        "INSERT INTO product_to_category (product_id, category_id) VALUES (10, 2), (11, 3), (12, 3)",
        "INSERT INTO product_special (product_id, price, date_start, date_end) VALUES (11, '1099.99', 0, 9999999999999), (12, '849', 0, 9999999999999)",
    ];
    for sql in statements {
        sqlx::query(sql).execute(repo.pool()).await.unwrap();
    }
}

async fn request(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_and_ready() {
    let test_app = setup_test_app().await;

    let (status, json) = request(test_app.app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");

    let (status, json) = request(test_app.app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ready");
}

#[tokio::test]
async fn test_min_price_from_subtree() {
    let test_app = setup_test_app().await;
    seed(&test_app.repo).await;

    let (status, json) = request(test_app.app, "/v1/categories/1/min-price").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["categoryId"], 1);
    assert_eq!(json["minPrice"], "499");
    assert_eq!(json["hasPrice"], true);
}

#[tokio::test]
async fn test_min_price_sentinel_for_empty_category() {
    let test_app = setup_test_app().await;

    let (status, json) = request(test_app.app, "/v1/categories/77/min-price").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["minPrice"], "0");
    assert_eq!(json["hasPrice"], false);
}

#[tokio::test]
async fn test_non_integer_category_id_rejected() {
    let test_app = setup_test_app().await;

    let (status, json) = request(test_app.app, "/v1/categories/abc/min-price").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_subtree_endpoint() {
    let test_app = setup_test_app().await;
    seed(&test_app.repo).await;

    let (status, json) = request(test_app.app, "/v1/categories/1/subtree").await;
    assert_eq!(status, StatusCode::OK);
    let mut ids: Vec<i64> = json["descendantIds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn test_specials_default_limit_and_fields() {
    let test_app = setup_test_app().await;
    seed(&test_app.repo).await;

    let (status, json) = request(test_app.app.clone(), "/v1/categories/1/specials").await;
    assert_eq!(status, StatusCode::OK);
    let products = json["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    for p in products {
        assert!(p["productId"].is_i64());
        assert!(p["price"].is_string());
        assert!(p["special"].is_string());
        assert!(p["name"].is_string());
    }

    let (_, json) = request(test_app.app, "/v1/categories/1/specials?limit=1").await;
    assert_eq!(json["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_newest_endpoint_order() {
    let test_app = setup_test_app().await;
    seed(&test_app.repo).await;

    let (status, json) = request(test_app.app, "/v1/categories/1/newest?limit=3").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = json["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["productId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![11, 12, 10]);
    assert!(json["products"][2]["special"].is_null());
}

#[tokio::test]
async fn test_newest_limit_capped_by_config() {
    let test_app = setup_test_app().await;
    seed(&test_app.repo).await;

    let (status, json) = request(test_app.app, "/v1/categories/1/newest?limit=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["products"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_children_endpoint_groups_by_parent() {
    let test_app = setup_test_app().await;
    seed(&test_app.repo).await;

    let (status, json) = request(test_app.app, "/v1/categories/children?parents=1,2").await;
    assert_eq!(status, StatusCode::OK);

    let groups = json["children"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["parentId"], 1);
    let names: Vec<&str> = groups[0]["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    // sort_order first: Laptops (0) before Phones (1)
    assert_eq!(names, vec!["Laptops", "Phones"]);
    assert_eq!(groups[1]["parentId"], 2);
    assert!(groups[1]["categories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_children_endpoint_requires_ids() {
    let test_app = setup_test_app().await;

    let (status, _) = request(test_app.app, "/v1/categories/children?parents=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_categories_by_ids_endpoint() {
    let test_app = setup_test_app().await;
    seed(&test_app.repo).await;

    let (status, json) = request(test_app.app, "/v1/categories?ids=3,99,1").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["categoryId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 1]);
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let test_app = setup_test_app().await;

    let (status, json) = request(test_app.app, "/v1/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}
