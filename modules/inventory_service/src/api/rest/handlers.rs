//! HTTP request handlers - thin layer that delegates to domain service

use super::{dto::*, error::Problem};
use crate::contract::TenantContext;
use crate::domain::Service;
use axum::{extract::Path, http::StatusCode, Json};
use std::sync::Arc;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "inventory-ai-backend";

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

// ===== Auth Handlers =====

pub async fn register(
    service: Arc<Service>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), Problem> {
    let account = service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

pub async fn login(
    service: Arc<Service>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Problem> {
    let session = service.login(&req.email, &req.password).await?;
    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}

// ===== Warehouse Handlers =====

pub async fn create_warehouse(
    service: Arc<Service>,
    ctx: TenantContext,
    Json(req): Json<CreateWarehouseRequest>,
) -> Result<(StatusCode, Json<WarehouseDto>), Problem> {
    let warehouse = service.create_warehouse(&ctx, req.into()).await?;
    Ok((StatusCode::CREATED, Json(warehouse.into())))
}

pub async fn list_warehouses(
    service: Arc<Service>,
    ctx: TenantContext,
) -> Result<Json<Vec<WarehouseDto>>, Problem> {
    let warehouses = service.list_warehouses(&ctx).await?;
    Ok(Json(warehouses.into_iter().map(Into::into).collect()))
}

pub async fn update_warehouse(
    service: Arc<Service>,
    ctx: TenantContext,
    Path(id): Path<String>,
    Json(req): Json<UpdateWarehouseRequest>,
) -> Result<Json<WarehouseDto>, Problem> {
    let warehouse = service.update_warehouse(&ctx, &id, req.into()).await?;
    Ok(Json(warehouse.into()))
}

pub async fn delete_warehouse(
    service: Arc<Service>,
    ctx: TenantContext,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    service.delete_warehouse(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Category Handlers =====

pub async fn create_category(
    service: Arc<Service>,
    ctx: TenantContext,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryDto>), Problem> {
    let category = service.create_category(&ctx, req.into()).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

pub async fn list_categories(
    service: Arc<Service>,
    ctx: TenantContext,
) -> Result<Json<Vec<CategoryDto>>, Problem> {
    let categories = service.list_categories(&ctx).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

pub async fn update_category(
    service: Arc<Service>,
    ctx: TenantContext,
    Path(id): Path<String>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryDto>, Problem> {
    let category = service.update_category(&ctx, &id, req.into()).await?;
    Ok(Json(category.into()))
}

pub async fn delete_category(
    service: Arc<Service>,
    ctx: TenantContext,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    service.delete_category(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Item Handlers =====

pub async fn create_item(
    service: Arc<Service>,
    ctx: TenantContext,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemDto>), Problem> {
    let item = service.create_item(&ctx, req.into()).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn list_items(
    service: Arc<Service>,
    ctx: TenantContext,
) -> Result<Json<Vec<ItemDto>>, Problem> {
    let items = service.list_items(&ctx).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub async fn update_item(
    service: Arc<Service>,
    ctx: TenantContext,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ItemDto>, Problem> {
    let item = service.update_item(&ctx, &id, req.into()).await?;
    Ok(Json(item.into()))
}

pub async fn delete_item(
    service: Arc<Service>,
    ctx: TenantContext,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    service.delete_item(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Analysis Handlers =====

pub async fn queue_analysis(
    service: Arc<Service>,
    ctx: TenantContext,
    Json(req): Json<QueueAnalysisRequest>,
) -> Result<(StatusCode, Json<QueueAnalysisResponse>), Problem> {
    let job_id = service.submit_analysis(&ctx, &req.image_url).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(QueueAnalysisResponse {
            message: "Image queued for processing".to_string(),
            job_id,
        }),
    ))
}
