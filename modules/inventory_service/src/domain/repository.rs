//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Relational implementations are in infra/storage/repositories.rs, the
//! document implementation is in infra/documents.
//!
//! Every data method takes a [`TenantScope`]: implementations must filter
//! every read and write by it and stamp it onto every created record.

use crate::contract::{
    Category, CategoryPatch, Item, ItemId, ItemPatch, NewCategory, NewItem, NewWarehouse,
    Tenant, TenantScope, User, Warehouse, WarehousePatch,
};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for warehouses (relational store)
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    /// Create a warehouse; the repository assigns id and timestamps
    async fn create(&self, scope: &TenantScope, new: &NewWarehouse) -> Result<Warehouse>;

    /// List all warehouses of the tenant
    async fn list(&self, scope: &TenantScope) -> Result<Vec<Warehouse>>;

    /// Apply the present fields of `patch`; `None` if no such warehouse in scope
    async fn update(
        &self,
        scope: &TenantScope,
        id: Uuid,
        patch: &WarehousePatch,
    ) -> Result<Option<Warehouse>>;

    /// Delete a warehouse; `false` if nothing matched in scope
    async fn delete(&self, scope: &TenantScope, id: Uuid) -> Result<bool>;
}

/// Repository for categories (relational store)
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, scope: &TenantScope, new: &NewCategory) -> Result<Category>;

    async fn list(&self, scope: &TenantScope) -> Result<Vec<Category>>;

    async fn update(
        &self,
        scope: &TenantScope,
        id: Uuid,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>>;

    async fn delete(&self, scope: &TenantScope, id: Uuid) -> Result<bool>;
}

/// Repository for items (document store)
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert an item; the repository assigns the document id and timestamps
    async fn create(&self, scope: &TenantScope, new: &NewItem) -> Result<Item>;

    /// List all items of the tenant
    async fn list(&self, scope: &TenantScope) -> Result<Vec<Item>>;

    /// Apply `patch` and return the stored document after the write
    async fn update(
        &self,
        scope: &TenantScope,
        id: &ItemId,
        patch: &ItemPatch,
    ) -> Result<Option<Item>>;

    async fn delete(&self, scope: &TenantScope, id: &ItemId) -> Result<bool>;
}

/// Repository for tenants and users (relational store)
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert tenant and user atomically.
    ///
    /// Returns `false` when the email is already registered; nothing is
    /// written in that case.
    async fn register(&self, tenant: &Tenant, user: &User) -> Result<bool>;

    /// Find a user by (normalized) email across all tenants
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}
