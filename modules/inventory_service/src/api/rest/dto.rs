//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Warehouse DTOs =====

/// Warehouse response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WarehouseDto {
    pub id: Uuid,

    /// Owning tenant
    pub tenant_id: Uuid,

    #[schema(example = "Main")]
    pub name: String,

    #[schema(example = "Berlin, Dock 4")]
    pub location: String,

    pub created_at: chrono::DateTime<chrono::Utc>,

    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Warehouse create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateWarehouseRequest {
    pub name: String,

    #[serde(default)]
    pub location: String,
}

/// Warehouse partial update; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateWarehouseRequest {
    pub name: Option<String>,

    /// Send `""` to clear the location
    pub location: Option<String>,
}

// ===== Category DTOs =====

/// Category response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: Uuid,
    pub tenant_id: Uuid,
    #[schema(example = "Electronics")]
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
}

// ===== Item DTOs =====

/// Item response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemDto {
    /// Document id (24 hex characters)
    #[schema(example = "65a1f0c2b3d4e5f60718293a")]
    pub id: String,

    /// String form of the owning tenant's UUID
    pub tenant_id: String,

    /// Soft reference to a warehouse, not checked
    pub warehouse_id: String,

    /// Soft reference to a category, not checked
    pub category_id: String,

    pub name: String,
    pub description: String,
    pub sku: String,
    pub quantity: i64,
    pub price: f64,
    pub images: Vec<String>,

    /// Free-form attributes, returned exactly as stored
    #[schema(value_type = Object)]
    pub attributes: serde_json::Map<String, serde_json::Value>,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Item create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub warehouse_id: String,
    #[serde(default)]
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Item partial update.
///
/// Omitted fields are left unchanged, except `description` which is always
/// written (an omitted description clears it).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub warehouse_id: Option<String>,
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub images: Option<Vec<String>>,
    #[schema(value_type = Option<Object>)]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
}

// ===== Auth DTOs =====

/// Registration request: creates a tenant and its admin user
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "owner@example.com")]
    pub email: String,
    pub password: String,
    /// Tenant name
    #[schema(example = "Acme")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// HS256 bearer token
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

// ===== Analysis DTOs =====

/// Image analysis submission
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QueueAnalysisRequest {
    /// Where the worker fetches the image from
    #[schema(example = "https://cdn.example.com/shelf-12.jpg")]
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueueAnalysisResponse {
    pub message: String,
    #[schema(example = "img_3f1c9a7e0d2b4c6f8a1e2d3c4b5a6f70")]
    pub job_id: String,
}

// ===== Health =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "inventory-ai-backend")]
    pub service: String,
}
