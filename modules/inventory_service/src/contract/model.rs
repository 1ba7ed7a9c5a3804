//! Contract models for inventory service
//!
//! These models are transport-agnostic and used by every layer.
//! NO serde derives - these are pure domain models.

use super::error::InventoryError;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Open-ended item attributes: insertion-ordered, dynamically typed values
pub type Attributes = serde_json::Map<String, serde_json::Value>;

// ===== Tenancy =====

/// Identity resolved from a verified credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    /// Tenant the caller acts for; `None` when the credential carried no tenant
    pub tenant_id: Option<Uuid>,
    /// Authenticated user
    pub user_id: Uuid,
    /// Role claim (e.g. "admin")
    pub role: String,
}

impl TenantContext {
    /// Create a context for a user acting inside a tenant
    pub fn new(tenant_id: Uuid, user_id: Uuid, role: impl Into<String>) -> Self {
        Self {
            tenant_id: Some(tenant_id),
            user_id,
            role: role.into(),
        }
    }

    /// Create a context whose credential did not name a tenant
    pub fn without_tenant(user_id: Uuid, role: impl Into<String>) -> Self {
        Self {
            tenant_id: None,
            user_id,
            role: role.into(),
        }
    }

    /// Resolve the tenant scope required by every data operation.
    ///
    /// A missing or nil tenant id yields [`InventoryError::MissingTenant`].
    pub fn scope(&self) -> Result<TenantScope, InventoryError> {
        match self.tenant_id {
            Some(id) if !id.is_nil() => Ok(TenantScope(id)),
            _ => Err(InventoryError::MissingTenant),
        }
    }
}

/// A resolved, non-nil tenant.
///
/// Repository traits only accept a `TenantScope`, and the only way to obtain
/// one is [`TenantContext::scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantScope(Uuid);

impl TenantScope {
    /// Relational form of the tenant identity
    pub fn tenant_id(&self) -> Uuid {
        self.0
    }

    /// Document-store form of the tenant identity (string copy of the UUID)
    pub fn document_key(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for TenantScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== Accounts =====

/// Tenant (organization) owning all reference data and items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    /// Subscription plan, "demo" at registration
    pub plan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User belonging to exactly one tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Login name, unique across all tenants
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Registration input: a new tenant and its first (admin) user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub tenant_name: String,
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub tenant: Tenant,
    pub user: User,
}

// ===== Warehouses =====

/// Physical storage location owned by a tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWarehouse {
    pub name: String,
    pub location: String,
}

/// Partial warehouse update.
///
/// `None` leaves the column untouched; `Some(String::new())` writes an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarehousePatch {
    pub name: Option<String>,
    pub location: Option<String>,
}

// ===== Categories =====

/// Item classification owned by a tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

/// Partial category update, same presence semantics as [`WarehousePatch`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
}

// ===== Items =====

/// Document identity of an item (24 lowercase hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Parse a caller-supplied item id
    pub fn parse(raw: &str) -> Result<Self, InventoryError> {
        if raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(InventoryError::invalid(format!(
                "item id '{}' is not a 24-character hex identifier",
                raw
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product item stored in the document store.
///
/// `warehouse_id` and `category_id` are soft references: nothing checks that
/// the referenced rows exist, and deleting a warehouse leaves its items intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    /// String copy of the owning tenant's UUID
    pub tenant_id: String,
    pub warehouse_id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub quantity: i64,
    pub price: f64,
    pub images: Vec<String>,
    pub attributes: Attributes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewItem {
    pub warehouse_id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub quantity: i64,
    pub price: f64,
    pub images: Vec<String>,
    pub attributes: Attributes,
}

/// Partial item update.
///
/// Every optional field is written only when present. `description` is the
/// exception: it is always written, so an absent description clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub warehouse_id: Option<String>,
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: String,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub images: Option<Vec<String>>,
    pub attributes: Option<Attributes>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_requires_tenant() {
        let user = Uuid::new_v4();
        assert_eq!(
            TenantContext::without_tenant(user, "admin").scope(),
            Err(InventoryError::MissingTenant)
        );
        assert_eq!(
            TenantContext::new(Uuid::nil(), user, "admin").scope(),
            Err(InventoryError::MissingTenant)
        );

        let tenant = Uuid::new_v4();
        let scope = TenantContext::new(tenant, user, "admin")
            .scope()
            .expect("scope");
        assert_eq!(scope.tenant_id(), tenant);
        assert_eq!(scope.document_key(), tenant.to_string());
    }

    #[test]
    fn test_item_id_parse() {
        let id = ItemId::parse("65A1F0C2B3D4E5F60718293A").expect("valid id");
        assert_eq!(id.as_str(), "65a1f0c2b3d4e5f60718293a");

        assert!(matches!(
            ItemId::parse("not-an-id"),
            Err(InventoryError::InvalidArgument { .. })
        ));
        assert!(ItemId::parse("65a1f0c2b3d4e5f60718293").is_err());
        assert!(ItemId::parse("65a1f0c2b3d4e5f60718293z").is_err());
    }
}
