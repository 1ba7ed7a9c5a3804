//! Inventory Service Module
//!
//! Multi-tenant inventory management. Reference data (tenants, users,
//! warehouses, categories) lives in a relational store, product items live in
//! a schema-flexible document store. Every data access is scoped to exactly one
//! tenant through [`TenantScope`]. Request throughput is bounded per identity by
//! a shared fixed-window counter, and image-analysis work is handed off to a
//! durable queue.

// Public exports
pub mod contract;
pub use contract::{
    Category, CategoryPatch, InventoryError, Item, ItemId, ItemPatch, NewCategory, NewItem,
    NewWarehouse, TenantContext, TenantScope, Warehouse, WarehousePatch,
};

pub mod module;
pub use module::{Backends, InventoryServiceModule};

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
