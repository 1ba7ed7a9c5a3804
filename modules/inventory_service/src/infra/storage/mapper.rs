//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{category, tenant, user, warehouse};
use crate::contract::{Category, Tenant, User, Warehouse};
use sea_orm::ActiveValue::Set;

// ===== Account Conversions =====

impl From<tenant::Model> for Tenant {
    fn from(entity: tenant::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            plan: entity.plan,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Tenant> for tenant::ActiveModel {
    fn from(model: &Tenant) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            plan: Set(model.plan.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

impl From<user::Model> for User {
    fn from(entity: user::Model) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            email: entity.email,
            password_hash: entity.password_hash,
            role: entity.role,
            created_at: entity.created_at,
        }
    }
}

impl From<&User> for user::ActiveModel {
    fn from(model: &User) -> Self {
        Self {
            id: Set(model.id),
            tenant_id: Set(model.tenant_id),
            email: Set(model.email.clone()),
            password_hash: Set(model.password_hash.clone()),
            role: Set(model.role.clone()),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Reference Data Conversions =====

impl From<warehouse::Model> for Warehouse {
    fn from(entity: warehouse::Model) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            name: entity.name,
            location: entity.location,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Warehouse> for warehouse::ActiveModel {
    fn from(model: &Warehouse) -> Self {
        Self {
            id: Set(model.id),
            tenant_id: Set(model.tenant_id),
            name: Set(model.name.clone()),
            location: Set(model.location.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

impl From<category::Model> for Category {
    fn from(entity: category::Model) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            name: entity.name,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Category> for category::ActiveModel {
    fn from(model: &Category) -> Self {
        Self {
            id: Set(model.id),
            tenant_id: Set(model.tenant_id),
            name: Set(model.name.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}
