//! Domain service - business logic orchestration

use super::jobs::{AnalysisJob, JobPublisher};
use super::repository::{
    AccountRepository, CategoryRepository, ItemRepository, WarehouseRepository,
};
use super::tenancy::{Claims, TokenCodec};
use super::validation;
use crate::config::Config;
use crate::contract::{
    Account, Category, CategoryPatch, InventoryError, Item, ItemId, ItemPatch, NewCategory,
    NewItem, NewWarehouse, Registration, Tenant, TenantContext, User, Warehouse, WarehousePatch,
};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

const RELATIONAL: &str = "relational";
const DOCUMENT: &str = "document";

/// Plan assigned to tenants created through registration
pub const DEFAULT_PLAN: &str = "demo";

/// Role of the first user of a tenant
pub const ADMIN_ROLE: &str = "admin";

/// Repository handles used by the service
#[derive(Clone)]
pub struct Repositories {
    pub warehouses: Arc<dyn WarehouseRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub accounts: Arc<dyn AccountRepository>,
}

/// Issued access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub context: TenantContext,
    pub expires_at: chrono::DateTime<Utc>,
}

/// Domain service for tenant-scoped inventory management
pub struct Service {
    repos: Repositories,
    publisher: Arc<dyn JobPublisher>,
    tokens: Arc<dyn TokenCodec>,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repos: Repositories,
        publisher: Arc<dyn JobPublisher>,
        tokens: Arc<dyn TokenCodec>,
        config: Config,
    ) -> Self {
        Self {
            repos,
            publisher,
            tokens,
            config,
        }
    }

    // ===== Warehouse Operations =====

    pub async fn create_warehouse(
        &self,
        ctx: &TenantContext,
        new: NewWarehouse,
    ) -> Result<Warehouse, InventoryError> {
        let scope = ctx.scope()?;
        validation::validate_new_warehouse(&new)?;

        let warehouse = self
            .within(RELATIONAL, "create_warehouse", self.repos.warehouses.create(&scope, &new))
            .await?;
        tracing::info!(tenant_id = %scope, warehouse_id = %warehouse.id, "warehouse created");
        Ok(warehouse)
    }

    pub async fn list_warehouses(
        &self,
        ctx: &TenantContext,
    ) -> Result<Vec<Warehouse>, InventoryError> {
        let scope = ctx.scope()?;
        self.within(RELATIONAL, "list_warehouses", self.repos.warehouses.list(&scope))
            .await
    }

    /// Apply a partial update; fields absent from `patch` keep their value
    pub async fn update_warehouse(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: WarehousePatch,
    ) -> Result<Warehouse, InventoryError> {
        let scope = ctx.scope()?;
        let record_id = validation::parse_record_id(id)?;
        validation::validate_warehouse_patch(&patch)?;

        self.within(
            RELATIONAL,
            "update_warehouse",
            self.repos.warehouses.update(&scope, record_id, &patch),
        )
        .await?
        .ok_or_else(|| InventoryError::not_found("warehouse", id))
    }

    /// Hard delete. Items referencing the warehouse are left untouched.
    pub async fn delete_warehouse(&self, ctx: &TenantContext, id: &str) -> Result<(), InventoryError> {
        let scope = ctx.scope()?;
        let record_id = validation::parse_record_id(id)?;

        let deleted = self
            .within(
                RELATIONAL,
                "delete_warehouse",
                self.repos.warehouses.delete(&scope, record_id),
            )
            .await?;
        if !deleted {
            return Err(InventoryError::not_found("warehouse", id));
        }
        tracing::info!(tenant_id = %scope, warehouse_id = %record_id, "warehouse deleted");
        Ok(())
    }

    // ===== Category Operations =====

    pub async fn create_category(
        &self,
        ctx: &TenantContext,
        new: NewCategory,
    ) -> Result<Category, InventoryError> {
        let scope = ctx.scope()?;
        validation::validate_new_category(&new)?;

        let category = self
            .within(RELATIONAL, "create_category", self.repos.categories.create(&scope, &new))
            .await?;
        tracing::info!(tenant_id = %scope, category_id = %category.id, "category created");
        Ok(category)
    }

    pub async fn list_categories(
        &self,
        ctx: &TenantContext,
    ) -> Result<Vec<Category>, InventoryError> {
        let scope = ctx.scope()?;
        self.within(RELATIONAL, "list_categories", self.repos.categories.list(&scope))
            .await
    }

    pub async fn update_category(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: CategoryPatch,
    ) -> Result<Category, InventoryError> {
        let scope = ctx.scope()?;
        let record_id = validation::parse_record_id(id)?;
        validation::validate_category_patch(&patch)?;

        self.within(
            RELATIONAL,
            "update_category",
            self.repos.categories.update(&scope, record_id, &patch),
        )
        .await?
        .ok_or_else(|| InventoryError::not_found("category", id))
    }

    pub async fn delete_category(&self, ctx: &TenantContext, id: &str) -> Result<(), InventoryError> {
        let scope = ctx.scope()?;
        let record_id = validation::parse_record_id(id)?;

        let deleted = self
            .within(
                RELATIONAL,
                "delete_category",
                self.repos.categories.delete(&scope, record_id),
            )
            .await?;
        if !deleted {
            return Err(InventoryError::not_found("category", id));
        }
        tracing::info!(tenant_id = %scope, category_id = %record_id, "category deleted");
        Ok(())
    }

    // ===== Item Operations =====

    /// Insert an item. Warehouse and category ids are stored as given,
    /// without checking the relational store.
    pub async fn create_item(&self, ctx: &TenantContext, new: NewItem) -> Result<Item, InventoryError> {
        let scope = ctx.scope()?;
        validation::validate_new_item(&new, self.config.max_attributes_bytes)?;

        let item = self
            .within(DOCUMENT, "create_item", self.repos.items.create(&scope, &new))
            .await?;
        tracing::info!(tenant_id = %scope, item_id = %item.id, "item created");
        Ok(item)
    }

    pub async fn list_items(&self, ctx: &TenantContext) -> Result<Vec<Item>, InventoryError> {
        let scope = ctx.scope()?;
        self.within(DOCUMENT, "list_items", self.repos.items.list(&scope))
            .await
    }

    /// Apply a field-level update and return the document as stored afterwards
    pub async fn update_item(
        &self,
        ctx: &TenantContext,
        id: &str,
        patch: ItemPatch,
    ) -> Result<Item, InventoryError> {
        let scope = ctx.scope()?;
        let item_id = ItemId::parse(id)?;
        validation::validate_item_patch(&patch, self.config.max_attributes_bytes)?;

        self.within(DOCUMENT, "update_item", self.repos.items.update(&scope, &item_id, &patch))
            .await?
            .ok_or_else(|| InventoryError::not_found("item", id))
    }

    pub async fn delete_item(&self, ctx: &TenantContext, id: &str) -> Result<(), InventoryError> {
        let scope = ctx.scope()?;
        let item_id = ItemId::parse(id)?;

        let deleted = self
            .within(DOCUMENT, "delete_item", self.repos.items.delete(&scope, &item_id))
            .await?;
        if !deleted {
            return Err(InventoryError::not_found("item", id));
        }
        tracing::info!(tenant_id = %scope, item_id = %item_id, "item deleted");
        Ok(())
    }

    // ===== Work Offload =====

    /// Hand an analysis job to the work queue and return its id.
    ///
    /// Success means the broker accepted the job, not that it was processed.
    pub async fn submit_analysis(
        &self,
        ctx: &TenantContext,
        payload_reference: &str,
    ) -> Result<String, InventoryError> {
        let scope = ctx.scope()?;
        let payload_reference = payload_reference.trim();
        if payload_reference.is_empty() {
            return Err(InventoryError::invalid("image_url cannot be empty"));
        }

        let job = AnalysisJob::new(ctx.user_id, payload_reference.to_string());
        match tokio::time::timeout(self.config.enqueue_timeout, self.publisher.publish(&job)).await
        {
            Ok(Ok(())) => {
                tracing::info!(
                    tenant_id = %scope,
                    job_id = %job.job_id,
                    "analysis job queued"
                );
                Ok(job.job_id)
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, job_id = %job.job_id, "failed to queue analysis job");
                Err(InventoryError::EnqueueFailed {
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                tracing::error!(
                    job_id = %job.job_id,
                    timeout = ?self.config.enqueue_timeout,
                    "analysis job enqueue timed out"
                );
                Err(InventoryError::EnqueueFailed {
                    reason: "broker did not confirm in time".to_string(),
                })
            }
        }
    }

    // ===== Accounts =====

    /// Create a tenant and its admin user
    pub async fn register(&self, registration: Registration) -> Result<Account, InventoryError> {
        let registration = validation::normalize_registration(&registration)?;

        let password = registration.password;
        let cost = self.config.password_cost;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing task failed");
                InventoryError::Internal
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing failed");
                InventoryError::Internal
            })?;

        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: registration.tenant_name,
            plan: DEFAULT_PLAN.to_string(),
            created_at: now,
            updated_at: now,
        };
        let user = User {
            id: Uuid::new_v4(),
            tenant_id: tenant.id,
            email: registration.email,
            password_hash,
            role: ADMIN_ROLE.to_string(),
            created_at: now,
        };

        let created = self
            .within(RELATIONAL, "register", self.repos.accounts.register(&tenant, &user))
            .await?;
        if !created {
            return Err(InventoryError::Conflict {
                reason: format!("email '{}' is already registered", user.email),
            });
        }

        tracing::info!(tenant_id = %tenant.id, user_id = %user.id, "tenant registered");
        Ok(Account { tenant, user })
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, InventoryError> {
        let email = validation::normalize_email(email);
        let user = self
            .within(
                RELATIONAL,
                "find_user_by_email",
                self.repos.accounts.find_user_by_email(&email),
            )
            .await?
            .ok_or_else(|| InventoryError::unauthenticated("invalid credentials"))?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password verification task failed");
                InventoryError::Internal
            })?
            .unwrap_or(false);
        if !verified {
            return Err(InventoryError::unauthenticated("invalid credentials"));
        }

        let context = TenantContext::new(user.tenant_id, user.id, user.role);
        let ttl = chrono::Duration::from_std(self.config.token_ttl).map_err(|e| {
            tracing::error!(error = %e, "token ttl out of range");
            InventoryError::Internal
        })?;
        let expires_at = Utc::now() + ttl;
        let token = self
            .tokens
            .issue(&Claims::new(&context, expires_at))
            .map_err(|e| {
                tracing::error!(error = %e, "failed to sign access token");
                InventoryError::Internal
            })?;

        Ok(Session {
            token,
            context,
            expires_at,
        })
    }

    // ===== Helper Methods =====

    /// Run a store call under the configured deadline.
    ///
    /// Any repository failure or deadline expiry becomes `StoreUnavailable`.
    async fn within<T>(
        &self,
        store: &'static str,
        operation: &'static str,
        fut: impl Future<Output = anyhow::Result<T>>,
    ) -> Result<T, InventoryError> {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!(error = %e, store, operation, "store call failed");
                Err(InventoryError::StoreUnavailable { store })
            }
            Err(_) => {
                tracing::error!(
                    store,
                    operation,
                    timeout = ?self.config.store_timeout,
                    "store call exceeded deadline"
                );
                Err(InventoryError::StoreUnavailable { store })
            }
        }
    }
}
