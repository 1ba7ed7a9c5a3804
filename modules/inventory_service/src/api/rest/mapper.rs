//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract;

// ===== Warehouse conversions =====

impl From<contract::Warehouse> for WarehouseDto {
    fn from(warehouse: contract::Warehouse) -> Self {
        Self {
            id: warehouse.id,
            tenant_id: warehouse.tenant_id,
            name: warehouse.name,
            location: warehouse.location,
            created_at: warehouse.created_at,
            updated_at: warehouse.updated_at,
        }
    }
}

impl From<CreateWarehouseRequest> for contract::NewWarehouse {
    fn from(req: CreateWarehouseRequest) -> Self {
        Self {
            name: req.name,
            location: req.location,
        }
    }
}

impl From<UpdateWarehouseRequest> for contract::WarehousePatch {
    fn from(req: UpdateWarehouseRequest) -> Self {
        Self {
            name: req.name,
            location: req.location,
        }
    }
}

// ===== Category conversions =====

impl From<contract::Category> for CategoryDto {
    fn from(category: contract::Category) -> Self {
        Self {
            id: category.id,
            tenant_id: category.tenant_id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl From<CreateCategoryRequest> for contract::NewCategory {
    fn from(req: CreateCategoryRequest) -> Self {
        Self { name: req.name }
    }
}

impl From<UpdateCategoryRequest> for contract::CategoryPatch {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self { name: req.name }
    }
}

// ===== Item conversions =====

impl From<contract::Item> for ItemDto {
    fn from(item: contract::Item) -> Self {
        Self {
            id: item.id.to_string(),
            tenant_id: item.tenant_id,
            warehouse_id: item.warehouse_id,
            category_id: item.category_id,
            name: item.name,
            description: item.description,
            sku: item.sku,
            quantity: item.quantity,
            price: item.price,
            images: item.images,
            attributes: item.attributes,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<CreateItemRequest> for contract::NewItem {
    fn from(req: CreateItemRequest) -> Self {
        Self {
            warehouse_id: req.warehouse_id,
            category_id: req.category_id,
            name: req.name,
            description: req.description,
            sku: req.sku,
            quantity: req.quantity,
            price: req.price,
            images: req.images,
            attributes: req.attributes,
        }
    }
}

impl From<UpdateItemRequest> for contract::ItemPatch {
    fn from(req: UpdateItemRequest) -> Self {
        Self {
            warehouse_id: req.warehouse_id,
            category_id: req.category_id,
            name: req.name,
            description: req.description.unwrap_or_default(),
            sku: req.sku,
            quantity: req.quantity,
            price: req.price,
            images: req.images,
            attributes: req.attributes,
        }
    }
}

// ===== Account conversions =====

impl From<RegisterRequest> for contract::Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            tenant_name: req.name,
        }
    }
}

impl From<contract::Account> for RegisterResponse {
    fn from(account: contract::Account) -> Self {
        Self {
            message: "Registration successful".to_string(),
            tenant_id: account.tenant.id,
            user_id: account.user.id,
        }
    }
}
