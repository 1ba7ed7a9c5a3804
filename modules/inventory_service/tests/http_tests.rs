//! HTTP surface tests driving the router in-process

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration as ChronoDuration, Utc};
use common::{print_test_header, test_config, Harness, TEST_SECRET};
use inventory_service::config::RateLimitConfig;
use inventory_service::contract::TenantContext;
use inventory_service::domain::tenancy::{Claims, TokenCodec};
use inventory_service::infra::auth::JwtCodec;
use inventory_service::Config;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

fn router(harness: &Harness, config: Config) -> Router {
    harness.module(config).register_rest(Router::new())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, value)
}

/// Register a tenant and return a bearer token for its admin
async fn signup(app: &Router, email: &str) -> String {
    let (status, _, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({"email": email, "password": "s3cret", "name": "Acme"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    let (status, _, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({"email": email, "password": "s3cret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = router(&Harness::default(), test_config());
    let (status, _, body) = send(&app, Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "service": "inventory-ai-backend"}));
}

#[tokio::test]
async fn test_protected_routes_require_credentials() {
    let app = router(&Harness::default(), test_config());

    let (status, _, body) = send(&app, Method::GET, "/api/v1/warehouses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _, _) = send(&app, Method::GET, "/api/v1/items", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = JwtCodec::new("other-secret")
        .issue(&Claims::new(
            &TenantContext::new(Uuid::new_v4(), Uuid::new_v4(), "admin"),
            Utc::now() + ChronoDuration::hours(1),
        ))
        .unwrap();
    let (status, _, _) = send(&app, Method::GET, "/api/v1/items", Some(&foreign), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_without_tenant_is_forbidden() {
    let app = router(&Harness::default(), test_config());
    let token = JwtCodec::new(TEST_SECRET)
        .issue(&Claims::new(
            &TenantContext::without_tenant(Uuid::new_v4(), "admin"),
            Utc::now() + ChronoDuration::hours(1),
        ))
        .unwrap();

    let (status, _, body) = send(&app, Method::GET, "/api/v1/categories", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["title"], "Missing Tenant");
}

#[tokio::test]
async fn test_warehouse_lifecycle_over_http() {
    print_test_header(
        "test_warehouse_lifecycle_over_http",
        &["Register, login, then create/list/update/delete a warehouse"],
    );
    let app = router(&Harness::default(), test_config());
    let token = signup(&app, "owner@example.com").await;

    let (status, _, created) = send(
        &app,
        Method::POST,
        "/api/v1/warehouses",
        Some(&token),
        Some(json!({"name": "Main", "location": "Berlin"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/warehouses/{}", id),
        Some(&token),
        Some(json!({"location": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Main");
    assert_eq!(updated["location"], "");

    let (status, _, listed) = send(&app, Method::GET, "/api/v1/warehouses", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/warehouses/{}", id);
    let (status, _, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(
        &app,
        Method::DELETE,
        "/api/v1/warehouses/not-a-uuid",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cross_tenant_item_access_is_not_found() {
    let app = router(&Harness::default(), test_config());
    let owner = signup(&app, "owner@acme.test").await;
    let intruder = signup(&app, "owner@globex.test").await;

    let (status, _, item) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(&owner),
        Some(json!({
            "name": "Widget",
            "quantity": 3,
            "attributes": {"color": "red", "batch": 12}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["attributes"], json!({"color": "red", "batch": 12}));
    let uri = format!("/api/v1/items/{}", item["id"].as_str().unwrap());

    let (status, _, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&intruder),
        Some(json!({"name": "Stolen"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, Method::DELETE, &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, theirs) = send(&app, Method::GET, "/api/v1/items", Some(&intruder), None).await;
    assert_eq!(theirs, json!([]));
    let (_, _, mine) = send(&app, Method::GET, "/api/v1/items", Some(&owner), None).await;
    assert_eq!(mine[0]["name"], "Widget");
}

#[tokio::test]
async fn test_rate_limit_response() {
    print_test_header(
        "test_rate_limit_response",
        &["The request past the limit gets 429 with Retry-After and retry_after_seconds"],
    );
    let config = Config {
        rate_limit: RateLimitConfig {
            limit: 2,
            window: Duration::from_secs(60),
        },
        ..test_config()
    };
    let app = router(&Harness::default(), config);

    for _ in 0..2 {
        let (status, _, _) = send(&app, Method::GET, "/api/v1/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, headers, body) = send(&app, Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = headers
        .get(header::RETRY_AFTER)
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));
    assert_eq!(body["retry_after_seconds"], retry_after);
}

#[tokio::test]
async fn test_queue_analysis() {
    let harness = Harness::default();
    let app = router(&harness, test_config());
    let token = signup(&app, "owner@example.com").await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/ai/queue",
        Some(&token),
        Some(json!({"image_url": "https://cdn.example.com/shelf.jpg"})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let job_id = body["job_id"].as_str().unwrap();
    assert!(job_id.starts_with("img_"));
    assert_eq!(harness.publisher.published()[0].job_id, job_id);

    harness.publisher.outage.set(true);
    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/v1/ai/queue",
        Some(&token),
        Some(json!({"image_url": "https://cdn.example.com/shelf.jpg"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = router(&Harness::default(), test_config());
    signup(&app, "owner@example.com").await;

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({"email": "owner@example.com", "password": "x", "name": "Other"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = router(&Harness::default(), test_config());
    let (status, _, body) = send(&app, Method::GET, "/api/v1/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["components"]["schemas"]["WarehouseDto"].is_object());
    assert!(body["components"]["schemas"]["ItemDto"].is_object());
}
