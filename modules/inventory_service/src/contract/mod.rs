//! Contract layer - transport-agnostic models and errors
//!
//! Shared by the domain service, the storage adapters and the REST layer.
//! NO serde derives on models - wire shapes live in `api::rest::dto`.

pub mod error;
pub mod model;

pub use error::InventoryError;
pub use model::{
    Account, Attributes, Category, CategoryPatch, Item, ItemId, ItemPatch, NewCategory, NewItem,
    NewWarehouse, Registration, Tenant, TenantContext, TenantScope, User, Warehouse,
    WarehousePatch,
};
