//! Session-level flows against a scripted backend.

use dynaprice_core::prelude::*;
use dynaprice_core::settings::API_URL_KEY;
use dynaprice_fetch::{FetchError, Method, MockTransport};
use serde_json::{json, Value};

fn catalog(n: usize) -> Value {
    let products: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "product_id": i + 1,
                // Minimum price sits in the middle of the list.
                "base_price": 50.0 + ((i as f64 - 30.0).abs() * 7.5),
                "name": format!("Product {:02}", i),
                "stock": (i * 3) % 40,
                "sales_7": i % 9,
                "sales_30": i % 31,
                "day": i % 7
            })
        })
        .collect();
    json!({"total": n, "skip": 0, "limit": 500, "products": products})
}

fn session(mock: &MockTransport) -> Dashboard<MockTransport> {
    let settings = MemorySettings::new().with(API_URL_KEY, "http://pricing-a:5000");
    Dashboard::new(PricingApi::new(mock.clone(), "http://unused"), settings)
}

fn script_overview(mock: &MockTransport) {
    mock.respond_json(
        Method::Get,
        "/health",
        200,
        json!({"status": "healthy", "model_loaded": true, "products_loaded": 45}),
    );
    mock.respond_json(
        Method::Get,
        "/model-status",
        200,
        json!({"status": "loaded", "model_loaded": true, "model_type": "RandomForestRegressor",
               "features": ["base_price", "stock", "sales_7", "sales_30", "day"]}),
    );
}

#[tokio::test]
async fn test_load_paginate_and_sort_45_products() {
    let mock = MockTransport::new();
    mock.respond_json(Method::Get, "/products?skip=0&limit=500", 200, catalog(45));
    let mut dash = session(&mock);

    assert_eq!(dash.load_products().await.unwrap(), 45);
    assert_eq!(dash.notification().unwrap().message, "Loaded 45 products");

    let info = dash.page_info();
    assert_eq!(info.total_pages, 3);
    assert_eq!(info.label(), "Page 1 of 3");
    let first: Vec<&str> = dash.page().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(first.len(), 20);
    assert_eq!(first[0], "Product 00");
    assert_eq!(first[19], "Product 19");

    assert!(dash.next_page());
    assert!(dash.next_page());
    assert_eq!(dash.page().len(), 5);
    assert!(!dash.next_page());

    dash.sort(SortKey::Price);
    assert_eq!(dash.page_info().page, 0);
    let min = dash
        .products()
        .items()
        .map(|p| p.base_price)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(dash.page()[0].base_price, min);
    assert_eq!(dash.page()[0].name, "Product 30");
}

#[tokio::test]
async fn test_clearing_search_restores_without_refetch() {
    let mock = MockTransport::new();
    mock.respond_json(Method::Get, "/products", 200, catalog(45));
    let mut dash = session(&mock);
    dash.load_products().await.unwrap();

    dash.search("product 1");
    assert_eq!(dash.products().len(), 10);
    dash.clear_search();
    assert_eq!(dash.products().len(), 45);
    assert_eq!(mock.request_count(Method::Get, "/products"), 1);
}

#[tokio::test]
async fn test_failed_reload_keeps_last_good_products() {
    let mock = MockTransport::new();
    mock.respond_json(Method::Get, "/products", 200, catalog(45));
    mock.fail(
        Method::Get,
        "/products",
        FetchError::RequestError("connection refused".into()),
    );
    let mut dash = session(&mock);

    dash.load_products().await.unwrap();
    let err = dash.load_products().await.unwrap_err();
    assert_eq!(err.kind(), "transport");
    assert_eq!(dash.products().source_len(), 45);

    let shown = dash.notification().unwrap();
    assert_eq!(shown.severity, Severity::Error);
    assert!(shown.message.contains("connection refused"));
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let mock = MockTransport::new();
    mock.respond_json(Method::Get, "/products", 503, json!({"detail": "Service unavailable"}));
    let mut dash = session(&mock);

    let err = dash.load_products().await.unwrap_err();
    assert_eq!(err.kind(), "status");
    assert!(dash.products().is_empty());
    assert_eq!(
        dash.notification().unwrap().message,
        "Error: API Error: 503: Service unavailable"
    );
}

#[tokio::test]
async fn test_changing_api_url_resets_and_hits_new_host() {
    let mock = MockTransport::new();
    mock.respond_json(Method::Get, "/products", 200, catalog(45));
    script_overview(&mock);
    let mut dash = session(&mock);

    dash.load_products().await.unwrap();
    dash.navigate(Section::Products).await;
    assert!(dash.is_loaded(Section::Products));
    mock.clear_requests();

    dash.set_api_url("http://pricing-b:8000/").await.unwrap();

    assert_eq!(dash.api_url(), "http://pricing-b:8000");
    assert_eq!(
        dash.settings().get(API_URL_KEY).as_deref(),
        Some("http://pricing-b:8000")
    );
    assert!(dash.products().is_empty());
    assert!(!dash.is_loaded(Section::Products));
    assert_eq!(dash.current_section(), Section::Overview);
    assert_eq!(dash.status(), ApiStatus::Online);

    let requests = mock.requests();
    assert!(!requests.is_empty());
    assert!(requests
        .iter()
        .all(|r| r.url().starts_with("http://pricing-b:8000/")));
}

#[tokio::test]
async fn test_invalid_api_url_is_rejected_and_kept() {
    let mock = MockTransport::new();
    let mut dash = session(&mock);

    assert!(dash.set_api_url("pricing-b:8000").await.is_err());
    assert_eq!(dash.api_url(), "http://pricing-a:5000");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_analytics_loads_once_per_session() {
    let mock = MockTransport::new();
    mock.respond_json(Method::Get, "/analytics/top-demand", 200, json!({"top_products": []}));
    mock.respond_json(Method::Get, "/analytics/low-stock", 200, json!({"low_stock_products": []}));
    mock.respond_json(Method::Get, "/analytics/high-value", 200, json!({"high_value_products": []}));
    script_overview(&mock);
    let mut dash = session(&mock);

    assert!(dash.navigate(Section::Analytics).await);
    assert!(!dash.navigate(NavigationEvent::new(Section::Analytics)).await);
    assert_eq!(mock.request_count(Method::Get, "/analytics/top-demand"), 1);
    assert_eq!(mock.request_count(Method::Get, "/analytics/low-stock"), 1);
    assert_eq!(mock.request_count(Method::Get, "/analytics/high-value"), 1);
    assert!(mock
        .requests()
        .iter()
        .any(|r| r.path() == "/analytics/low-stock?threshold=10"));

    // A refresh makes the next visit fetch again.
    assert!(dash.refresh().await);
    assert!(dash.navigate(Section::Analytics).await);
    assert_eq!(mock.request_count(Method::Get, "/analytics/top-demand"), 2);
}

#[tokio::test]
async fn test_invalid_calculator_input_sends_nothing() {
    let mock = MockTransport::new();
    let mut dash = session(&mock);

    let form = PricingForm {
        product_id: "7".into(),
        base_price: "".into(),
        stock: "12".into(),
        sales_7: "3".into(),
        sales_30: "-1".into(),
        day: "2".into(),
    };
    let err = dash.calculate_price(&form).await.unwrap_err();
    assert_eq!(err.kind(), "validation");
    assert!(mock.requests().is_empty());
    assert_eq!(dash.notification().unwrap().severity, Severity::Error);
}

#[tokio::test]
async fn test_calculator_posts_typed_body() {
    let mock = MockTransport::new();
    mock.respond_json(
        Method::Post,
        "/predict-price",
        200,
        json!({"base_price": 100.0, "multiplier": 1.15, "dynamic_price": 115.0,
               "change_percent": 15.0, "recommendation": "PREMIUM - High demand detected"}),
    );
    let mut dash = session(&mock);

    let form = PricingForm {
        product_id: "7".into(),
        base_price: "100".into(),
        stock: "12".into(),
        sales_7: "30".into(),
        sales_30: "90".into(),
        day: "5".into(),
    };
    let result = dash.calculate_price(&form).await.unwrap();
    assert_eq!(result.dynamic_price, 115.0);

    let body = mock.requests()[0].body_json().unwrap();
    assert_eq!(
        body,
        json!({"product_id": 7, "base_price": 100.0, "stock": 12,
               "sales_7": 30, "sales_30": 90, "day": 5})
    );
}

#[tokio::test]
async fn test_export_uses_visible_list() {
    let mock = MockTransport::new();
    mock.respond_json(Method::Get, "/products", 200, catalog(45));
    let mut dash = session(&mock);
    dash.load_products().await.unwrap();

    dash.search("product 4");
    let text = dash.export_csv().unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "product_id,name,base_price,stock,sales_7,sales_30,day"
    );
    // Header plus "Product 40".."Product 44".
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("41,\"Product 40\","));
    assert_eq!(dash.notification().unwrap().message, "Products exported successfully");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.csv");
    assert_eq!(dash.export_to(&path).unwrap(), 5);
}
