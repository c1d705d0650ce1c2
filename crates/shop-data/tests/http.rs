//! HTTP collaborators against an in-process API server.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use shop_commerce::prelude::*;
use shop_data::{ApiClient, ApiConfig, HttpAdmin, HttpCatalog, HttpOrders};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TOKEN: &str = "admin-token";

#[derive(Clone, Default)]
struct Received {
    orders: Arc<Mutex<Vec<Value>>>,
}

async fn products() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Ryzen 5", "description": "6 cores", "price": 149.99,
         "stock": 4, "category": "CPU", "imageUrl": "/img/r5.png"},
        {"id": 2, "name": "B650 Board", "description": "AM5", "price": 179.5,
         "stock": 0, "category": "Motherboard"}
    ]))
}

async fn add_order(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
    received.orders.lock().unwrap().push(body.clone());
    let mut created = body;
    created["id"] = json!(77);
    created["items"] = json!([{"id": 1, "quantity": 2, "product": {"id": 1}}]);
    Json(created)
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {TOKEN}");
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|value| value == expected)
}

async fn list_orders(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!([
        {"id": 1, "customerName": "Ana", "customerEmail": "ana@example.com",
         "customerPhone": "555", "orderDate": "2024-06-01", "status": "Pending",
         "notes": null, "items": []},
        {"id": 2, "customerName": "Ben", "customerEmail": "ben@example.com",
         "customerPhone": "556", "orderDate": "2024-06-03", "status": "Completed",
         "notes": "gift", "items": []}
    ])))
}

async fn inquiries(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!([
        {"id": 9, "name": "Cy", "email": "cy@example.com", "subject": "Warranty",
         "message": "Fan is loud", "status": "PENDING",
         "createdAt": "2024-06-02T12:00:00"}
    ])))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!([]))
}

/// Serve the fake API on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn api() -> (String, Received) {
    let received = Received::default();
    let router = Router::new()
        .route("/api/products", get(products))
        .route("/api/orders/add", post(add_order))
        .route("/api/orders", get(list_orders))
        .route("/api/admin/inquiries", get(inquiries))
        .with_state(received.clone());
    (serve(router).await, received)
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(ApiConfig::new(base_url).with_auth_token(TOKEN)).unwrap()
}

fn draft() -> OrderDraft {
    let mut cart = Cart::new();
    cart.add(&Item::new(1u64, "Ryzen 5", Money::from_cents(14_999), 4, "CPU"));
    cart.add(&Item::new(1u64, "Ryzen 5", Money::from_cents(14_999), 4, "CPU"));
    let buyer = BuyerDetails::default()
        .with_name("Dee")
        .with_email("dee@example.com")
        .with_phone("555-0177");
    OrderDraft::new(&cart.snapshot(), &buyer, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap())
}

#[tokio::test]
async fn test_catalog_fetch() {
    let (base_url, _) = api().await;
    let catalog = Catalog::load(&HttpCatalog::new(client(&base_url))).await;

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.categories(), ["CPU", "Motherboard"]);
    let first = &catalog.items()[0];
    assert_eq!(first.price, Money::from_cents(14_999));
    assert_eq!(first.image_ref.as_deref(), Some("/img/r5.png"));
    assert!(!catalog.items()[1].in_stock());
}

#[tokio::test]
async fn test_catalog_server_error_is_empty_catalog() {
    let base_url = serve(Router::new().route("/api/products", get(broken))).await;
    let source = HttpCatalog::new(client(&base_url));

    let err = source.fetch_items().await.unwrap_err();
    assert_eq!(
        err,
        CommerceError::Http {
            status: 500,
            message: "database unavailable".into()
        }
    );

    let catalog = Catalog::load(&source).await;
    assert!(catalog.is_empty());
    assert!(catalog.load_error().is_some());
}

#[tokio::test]
async fn test_catalog_unreachable_is_transport_error() {
    let source = HttpCatalog::new(client("http://127.0.0.1:9"));
    let err = source.fetch_items().await.unwrap_err();
    assert!(matches!(err, CommerceError::Transport(_)));
}

#[tokio::test]
async fn test_catalog_timeout() {
    let base_url = serve(Router::new().route("/api/products", get(slow))).await;
    let config = ApiConfig::new(&base_url).with_timeout(Duration::from_millis(100));
    let source = HttpCatalog::new(ApiClient::new(config).unwrap());

    let err = source.fetch_items().await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_submit_order() {
    let (base_url, received) = api().await;
    let orders = HttpOrders::new(client(&base_url));

    let result = orders.submit(&draft()).await.unwrap();
    assert_eq!(result.id.as_str(), "77");
    assert_eq!(result.status(), OrderStatus::Pending);
    assert_eq!(result.draft.lines[0].quantity, 2);

    let sent = received.orders.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["customerEmail"], "dee@example.com");
    assert_eq!(sent[0]["orderDate"], "2024-06-04");
    assert_eq!(sent[0]["status"], "Pending");
    assert_eq!(sent[0]["items"], json!([{"productId": "1", "quantity": 2}]));
}

#[tokio::test]
async fn test_checkout_against_failing_api_keeps_cart() {
    let base_url = serve(Router::new().route("/api/orders/add", post(broken))).await;
    let orders = HttpOrders::new(client(&base_url));

    let mut cart = Cart::new();
    cart.add(&Item::new(1u64, "Ryzen 5", Money::from_cents(14_999), 4, "CPU"));
    let identity = Identity::authenticated();
    let buyer = BuyerDetails::default()
        .with_email("dee@example.com")
        .with_phone("555-0177");

    let mut checkout = CheckoutFlow::default();
    let state = checkout.confirm(&mut cart, &identity, &buyer, &orders).await;
    assert!(matches!(state, CheckoutState::Failed(CheckoutFailure::Rejected(_))));
    assert_eq!(cart.count(), 1);
}

#[tokio::test]
async fn test_admin_tables() {
    let (base_url, _) = api().await;
    let admin = HttpAdmin::new(client(&base_url));

    let orders = admin.fetch_orders().await.unwrap();
    let page = list_page(&orders, &ListQuery::<OrderSortField>::default());
    let ids: Vec<&str> = page.items.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(status_counts(&orders).get("pending"), Some(&1));

    let inquiries = admin.fetch_inquiries().await.unwrap();
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].subject, "Warranty");
}

#[tokio::test]
async fn test_inquiries_require_token() {
    let (base_url, _) = api().await;
    let admin = HttpAdmin::new(ApiClient::new(ApiConfig::new(&base_url)).unwrap());

    let err = admin.fetch_inquiries().await.unwrap_err();
    assert!(matches!(err, CommerceError::Http { status: 401, .. }));
}

#[tokio::test]
async fn test_orders_send_token() {
    let (base_url, _) = api().await;

    let anonymous = HttpAdmin::new(ApiClient::new(ApiConfig::new(&base_url)).unwrap());
    let err = anonymous.fetch_orders().await.unwrap_err();
    assert!(matches!(err, CommerceError::Http { status: 401, .. }));

    let admin = HttpAdmin::new(client(&base_url));
    assert_eq!(admin.fetch_orders().await.unwrap().len(), 2);
}
