//! Route registration and OpenAPI document

use super::middleware::{gate_request, RequestGate};
use super::{dto::*, error::Problem, handlers};
use crate::contract::TenantContext;
use crate::domain::Service;
use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

/// Prefix of every route
pub const API_PREFIX: &str = "/api/v1";

#[derive(OpenApi)]
#[openapi(
    info(title = "Inventory API", description = "Multi-tenant inventory management"),
    components(schemas(
        WarehouseDto,
        CreateWarehouseRequest,
        UpdateWarehouseRequest,
        CategoryDto,
        CreateCategoryRequest,
        UpdateCategoryRequest,
        ItemDto,
        CreateItemRequest,
        UpdateItemRequest,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        QueueAnalysisRequest,
        QueueAnalysisResponse,
        HealthResponse,
    ))
)]
pub struct ApiDoc;

/// Register all REST routes under [`API_PREFIX`]
pub fn register_routes(router: Router, service: Arc<Service>, gate: RequestGate) -> Router {
    let v1 = Router::new()
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(openapi_handler))
        // Auth endpoints
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        // Warehouse endpoints
        .route(
            "/warehouses",
            post(create_warehouse_handler).get(list_warehouses_handler),
        )
        .route(
            "/warehouses/{id}",
            put(update_warehouse_handler).delete(delete_warehouse_handler),
        )
        // Category endpoints
        .route(
            "/categories",
            post(create_category_handler).get(list_categories_handler),
        )
        .route(
            "/categories/{id}",
            put(update_category_handler).delete(delete_category_handler),
        )
        // Item endpoints
        .route("/items", post(create_item_handler).get(list_items_handler))
        .route(
            "/items/{id}",
            put(update_item_handler).delete(delete_item_handler),
        )
        // Analysis endpoints
        .route("/ai/queue", post(queue_analysis_handler))
        .layer(middleware::from_fn_with_state(gate, gate_request))
        .layer(Extension(service));

    router
        .nest(API_PREFIX, v1)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// Wrapper handlers that extract the service from Extension

async fn register_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), Problem> {
    handlers::register(service, json).await
}

async fn login_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Problem> {
    handlers::login(service, json).await
}

async fn create_warehouse_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    json: Json<CreateWarehouseRequest>,
) -> Result<(StatusCode, Json<WarehouseDto>), Problem> {
    handlers::create_warehouse(service, ctx, json).await
}

async fn list_warehouses_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
) -> Result<Json<Vec<WarehouseDto>>, Problem> {
    handlers::list_warehouses(service, ctx).await
}

async fn update_warehouse_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    path: Path<String>,
    json: Json<UpdateWarehouseRequest>,
) -> Result<Json<WarehouseDto>, Problem> {
    handlers::update_warehouse(service, ctx, path, json).await
}

async fn delete_warehouse_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    path: Path<String>,
) -> Result<StatusCode, Problem> {
    handlers::delete_warehouse(service, ctx, path).await
}

async fn create_category_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    json: Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryDto>), Problem> {
    handlers::create_category(service, ctx, json).await
}

async fn list_categories_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
) -> Result<Json<Vec<CategoryDto>>, Problem> {
    handlers::list_categories(service, ctx).await
}

async fn update_category_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    path: Path<String>,
    json: Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryDto>, Problem> {
    handlers::update_category(service, ctx, path, json).await
}

async fn delete_category_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    path: Path<String>,
) -> Result<StatusCode, Problem> {
    handlers::delete_category(service, ctx, path).await
}

async fn create_item_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    json: Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemDto>), Problem> {
    handlers::create_item(service, ctx, json).await
}

async fn list_items_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
) -> Result<Json<Vec<ItemDto>>, Problem> {
    handlers::list_items(service, ctx).await
}

async fn update_item_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    path: Path<String>,
    json: Json<UpdateItemRequest>,
) -> Result<Json<ItemDto>, Problem> {
    handlers::update_item(service, ctx, path, json).await
}

async fn delete_item_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    path: Path<String>,
) -> Result<StatusCode, Problem> {
    handlers::delete_item(service, ctx, path).await
}

async fn queue_analysis_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: TenantContext,
    json: Json<QueueAnalysisRequest>,
) -> Result<(StatusCode, Json<QueueAnalysisResponse>), Problem> {
    handlers::queue_analysis(service, ctx, json).await
}
