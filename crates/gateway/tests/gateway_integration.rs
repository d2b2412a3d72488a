//! Integration tests for the gateway over in-memory backends.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use account::{Account, AccountService, AccountStore, InMemoryAccountStore};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog::{CatalogService, InMemoryProductStore, Product, ProductStore};
use common::{AccountId, Money, ProductId};
use gateway::adapters::{LocalAccountDirectory, LocalOrderBackend, LocalProductCatalog};
use gateway::aggregator::Aggregator;
use metrics_exporter_prometheus::PrometheusHandle;
use order::{InMemoryOrderStore, OrderService};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

struct Fixture {
    app: axum::Router,
    order_store: InMemoryOrderStore,
}

/// Wires the gateway over in-memory backends, seeded with account `acc_1`
/// and product `p1` (Widget, 999 cents). The order store also knows `p2`,
/// which the catalog does not return.
async fn setup() -> Fixture {
    let account_store = InMemoryAccountStore::new();
    account_store
        .put_account(&Account {
            id: AccountId::new("acc_1"),
            name: "Alice".to_string(),
        })
        .await
        .unwrap();

    let product_store = InMemoryProductStore::new();
    product_store
        .put_product(&Product {
            id: ProductId::new("p1"),
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: Money::from_cents(999),
        })
        .await
        .unwrap();

    let order_store = InMemoryOrderStore::new();
    order_store.insert_account("acc_1").await;
    order_store.insert_product("p1").await;
    order_store.insert_product("p2").await;

    let aggregator = Arc::new(Aggregator::new(
        Arc::new(LocalAccountDirectory::new(AccountService::new(
            account_store,
        ))),
        Arc::new(LocalProductCatalog::new(CatalogService::new(product_store))),
        Arc::new(LocalOrderBackend::new(OrderService::new(
            order_store.clone(),
        ))),
    ));

    let app = gateway::create_app(aggregator, get_metrics_handle(), Duration::from_secs(10));

    Fixture { app, order_store }
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let fixture = setup().await;

    let (status, body) = send(&fixture.app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_end_to_end_create_order_with_lossy_hydration() {
    let fixture = setup().await;

    // p1 hydrates from the catalog; p2 is unknown to the catalog and keeps
    // empty attributes and a zero price.
    let (status, body) = send(
        &fixture.app,
        "POST",
        "/orders",
        Some(serde_json::json!({
            "account_id": "acc_1",
            "items": [
                { "product_id": "p1", "quantity": 3 },
                { "product_id": "p2", "quantity": 1 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_price_cents"], 2997);
    assert_eq!(body["account_id"], "acc_1");

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Widget");
    assert_eq!(items[0]["price_cents"], 999);
    assert_eq!(items[1]["name"], "");
    assert_eq!(items[1]["price_cents"], 0);

    assert_eq!(fixture.order_store.order_count().await, 1);
    assert_eq!(fixture.order_store.item_count().await, 2);

    // The order shows up under the account, with the written total.
    let (status, body) = send(&fixture.app, "GET", "/accounts/acc_1/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["total_price_cents"], 2997);
}

#[tokio::test]
async fn test_create_order_drops_zero_quantity_items() {
    let fixture = setup().await;

    let (status, body) = send(
        &fixture.app,
        "POST",
        "/orders",
        Some(serde_json::json!({
            "account_id": "acc_1",
            "items": [
                { "product_id": "p1", "quantity": 2 },
                { "product_id": "p1", "quantity": 0 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(fixture.order_store.item_count().await, 1);
}

#[tokio::test]
async fn test_create_order_all_zero_quantities_is_bad_request() {
    let fixture = setup().await;

    let (status, body) = send(
        &fixture.app,
        "POST",
        "/orders",
        Some(serde_json::json!({
            "account_id": "acc_1",
            "items": [{ "product_id": "p1", "quantity": 0 }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_parameter");
    assert_eq!(fixture.order_store.order_count().await, 0);
}

#[tokio::test]
async fn test_create_order_unknown_account_persists_nothing() {
    let fixture = setup().await;

    let (status, body) = send(
        &fixture.app,
        "POST",
        "/orders",
        Some(serde_json::json!({
            "account_id": "acc_missing",
            "items": [{ "product_id": "p1", "quantity": 1 }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    assert_eq!(fixture.order_store.order_count().await, 0);
    assert_eq!(fixture.order_store.item_count().await, 0);
}

#[tokio::test]
async fn test_accounts_exact_id_miss_is_empty_list() {
    let fixture = setup().await;

    let (status, body) = send(&fixture.app, "GET", "/accounts?id=acc_missing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (status, body) = send(&fixture.app, "GET", "/accounts?id=acc_1", None).await;
    assert_eq!(status, StatusCode::OK);
    let accounts = body.as_array().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0]["name"], "Alice");
}

#[tokio::test]
async fn test_account_overview_embeds_orders() {
    let fixture = setup().await;

    send(
        &fixture.app,
        "POST",
        "/orders",
        Some(serde_json::json!({
            "account_id": "acc_1",
            "items": [{ "product_id": "p1", "quantity": 1 }]
        })),
    )
    .await;

    let (status, body) = send(&fixture.app, "GET", "/accounts/acc_1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["orders"].as_array().unwrap().len(), 1);

    let (status, _) = send(&fixture.app, "GET", "/accounts/acc_missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_account_with_no_orders_is_empty_list() {
    let fixture = setup().await;

    let (status, body) = send(&fixture.app, "GET", "/accounts/acc_1/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_pagination_normalization() {
    let fixture = setup().await;

    let (status, _) = send(&fixture.app, "GET", "/products?take=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&fixture.app, "GET", "/accounts?skip=-2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // take above the cap clamps down instead of failing
    let (status, body) = send(&fixture.app, "GET", "/products?take=150", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // skip=0, take=0 resolves to the first full page
    let (status, body) = send(&fixture.app, "GET", "/products?skip=0&take=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_and_query_product() {
    let fixture = setup().await;

    let (status, created) = send(
        &fixture.app,
        "POST",
        "/products",
        Some(serde_json::json!({
            "name": "Gadget",
            "description": "A shiny gadget",
            "price_cents": 2500
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&fixture.app, "GET", &format!("/products?id={id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap()[0]["name"], "Gadget");

    let (status, body) = send(
        &fixture.app,
        "GET",
        &format!("/products?ids={id},p1,p_missing"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // the unknown id is silently omitted
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(&fixture.app, "GET", "/products?query=shiny", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_account_roundtrip() {
    let fixture = setup().await;

    let (status, created) = send(
        &fixture.app,
        "POST",
        "/accounts",
        Some(serde_json::json!({ "name": "Bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Bob");

    let (status, _) = send(
        &fixture.app,
        "POST",
        "/accounts",
        Some(serde_json::json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&fixture.app, "GET", "/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}
