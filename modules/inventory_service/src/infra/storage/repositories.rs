//! SeaORM repository implementations
//!
//! Every statement on tenant-owned tables carries a `tenant_id` predicate.
//! Updates and deletes filter on `(id, tenant_id)` together, so a record of
//! another tenant is indistinguishable from a missing one.

use crate::contract::{
    Category, CategoryPatch, NewCategory, NewWarehouse, Tenant, TenantScope, User, Warehouse,
    WarehousePatch,
};
use crate::domain::repository::{AccountRepository, CategoryRepository, WarehouseRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    prelude::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{category, user, warehouse};

// ===== Warehouse Repository =====

pub struct SeaOrmWarehouseRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmWarehouseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_scoped(&self, scope: &TenantScope, id: Uuid) -> Result<Option<Warehouse>> {
        let result = warehouse::Entity::find()
            .filter(warehouse::Column::Id.eq(id))
            .filter(warehouse::Column::TenantId.eq(scope.tenant_id()))
            .one(&*self.db)
            .await?;

        Ok(result.map(|e| e.into()))
    }
}

#[async_trait]
impl WarehouseRepository for SeaOrmWarehouseRepository {
    async fn create(&self, scope: &TenantScope, new: &NewWarehouse) -> Result<Warehouse> {
        let now = Utc::now();
        let record = Warehouse {
            id: Uuid::new_v4(),
            tenant_id: scope.tenant_id(),
            name: new.name.clone(),
            location: new.location.clone(),
            created_at: now,
            updated_at: now,
        };

        let active: warehouse::ActiveModel = (&record).into();
        let result = active.insert(&*self.db).await?;

        Ok(result.into())
    }

    async fn list(&self, scope: &TenantScope) -> Result<Vec<Warehouse>> {
        let results = warehouse::Entity::find()
            .filter(warehouse::Column::TenantId.eq(scope.tenant_id()))
            .order_by_asc(warehouse::Column::CreatedAt)
            .order_by_asc(warehouse::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn update(
        &self,
        scope: &TenantScope,
        id: Uuid,
        patch: &WarehousePatch,
    ) -> Result<Option<Warehouse>> {
        let mut update = warehouse::Entity::update_many()
            .col_expr(warehouse::Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(name) = &patch.name {
            update = update.col_expr(warehouse::Column::Name, Expr::value(name.clone()));
        }
        if let Some(location) = &patch.location {
            update = update.col_expr(warehouse::Column::Location, Expr::value(location.clone()));
        }

        let result = update
            .filter(warehouse::Column::Id.eq(id))
            .filter(warehouse::Column::TenantId.eq(scope.tenant_id()))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_scoped(scope, id).await
    }

    async fn delete(&self, scope: &TenantScope, id: Uuid) -> Result<bool> {
        let result = warehouse::Entity::delete_many()
            .filter(warehouse::Column::Id.eq(id))
            .filter(warehouse::Column::TenantId.eq(scope.tenant_id()))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

// ===== Category Repository =====

pub struct SeaOrmCategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn create(&self, scope: &TenantScope, new: &NewCategory) -> Result<Category> {
        let now = Utc::now();
        let record = Category {
            id: Uuid::new_v4(),
            tenant_id: scope.tenant_id(),
            name: new.name.clone(),
            created_at: now,
            updated_at: now,
        };

        let active: category::ActiveModel = (&record).into();
        let result = active.insert(&*self.db).await?;

        Ok(result.into())
    }

    async fn list(&self, scope: &TenantScope) -> Result<Vec<Category>> {
        let results = category::Entity::find()
            .filter(category::Column::TenantId.eq(scope.tenant_id()))
            .order_by_asc(category::Column::CreatedAt)
            .order_by_asc(category::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn update(
        &self,
        scope: &TenantScope,
        id: Uuid,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>> {
        let mut update = category::Entity::update_many()
            .col_expr(category::Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(name) = &patch.name {
            update = update.col_expr(category::Column::Name, Expr::value(name.clone()));
        }

        let result = update
            .filter(category::Column::Id.eq(id))
            .filter(category::Column::TenantId.eq(scope.tenant_id()))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let updated = category::Entity::find()
            .filter(category::Column::Id.eq(id))
            .filter(category::Column::TenantId.eq(scope.tenant_id()))
            .one(&*self.db)
            .await?;

        Ok(updated.map(|e| e.into()))
    }

    async fn delete(&self, scope: &TenantScope, id: Uuid) -> Result<bool> {
        let result = category::Entity::delete_many()
            .filter(category::Column::Id.eq(id))
            .filter(category::Column::TenantId.eq(scope.tenant_id()))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

// ===== Account Repository =====

pub struct SeaOrmAccountRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAccountRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn register(&self, tenant: &Tenant, user: &User) -> Result<bool> {
        let txn = self.db.begin().await?;

        let tenant_model: super::entity::tenant::ActiveModel = tenant.into();
        tenant_model.insert(&txn).await?;

        let user_model: user::ActiveModel = user.into();
        match user_model.insert(&txn).await {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                txn.rollback().await?;
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        }

        txn.commit().await?;
        Ok(true)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await?;

        Ok(result.map(|e| e.into()))
    }
}
