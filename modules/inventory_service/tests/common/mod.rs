//! Common test utilities: in-memory ports and a wired service

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use inventory_service::contract::*;
use inventory_service::domain::admission::{CounterStore, WindowTtl};
use inventory_service::domain::jobs::{AnalysisJob, JobPublisher};
use inventory_service::domain::repository::{
    AccountRepository, CategoryRepository, ItemRepository, WarehouseRepository,
};
use inventory_service::domain::tenancy::TokenCodec;
use inventory_service::domain::{Repositories, Service};
use inventory_service::infra::auth::JwtCodec;
use inventory_service::{Config, InventoryServiceModule};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// Context of an admin user inside a fresh tenant
pub fn tenant_ctx() -> TenantContext {
    TenantContext::new(Uuid::new_v4(), Uuid::new_v4(), "admin")
}

pub fn attributes(value: serde_json::Value) -> Attributes {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected JSON object, got {}", other),
    }
}

pub mod mocks {
    use super::*;

    /// Switch shared by mocks to simulate an unreachable store
    #[derive(Clone, Default)]
    pub struct Outage(Arc<AtomicBool>);

    impl Outage {
        pub fn set(&self, down: bool) {
            self.0.store(down, Ordering::SeqCst);
        }

        fn check(&self, store: &str) -> anyhow::Result<()> {
            if self.0.load(Ordering::SeqCst) {
                anyhow::bail!("{} store connection refused", store);
            }
            Ok(())
        }
    }

    // ===== Relational mocks =====

    #[derive(Clone, Default)]
    pub struct MockWarehouseRepo {
        data: Arc<RwLock<Vec<Warehouse>>>,
        pub outage: Outage,
    }

    impl MockWarehouseRepo {
        pub fn count(&self) -> usize {
            self.data.read().len()
        }
    }

    #[async_trait]
    impl WarehouseRepository for MockWarehouseRepo {
        async fn create(&self, scope: &TenantScope, new: &NewWarehouse) -> anyhow::Result<Warehouse> {
            self.outage.check("relational")?;
            let now = Utc::now();
            let record = Warehouse {
                id: Uuid::new_v4(),
                tenant_id: scope.tenant_id(),
                name: new.name.clone(),
                location: new.location.clone(),
                created_at: now,
                updated_at: now,
            };
            self.data.write().push(record.clone());
            Ok(record)
        }

        async fn list(&self, scope: &TenantScope) -> anyhow::Result<Vec<Warehouse>> {
            self.outage.check("relational")?;
            Ok(self
                .data
                .read()
                .iter()
                .filter(|w| w.tenant_id == scope.tenant_id())
                .cloned()
                .collect())
        }

        async fn update(
            &self,
            scope: &TenantScope,
            id: Uuid,
            patch: &WarehousePatch,
        ) -> anyhow::Result<Option<Warehouse>> {
            self.outage.check("relational")?;
            let mut data = self.data.write();
            let Some(record) = data
                .iter_mut()
                .find(|w| w.id == id && w.tenant_id == scope.tenant_id())
            else {
                return Ok(None);
            };
            if let Some(name) = &patch.name {
                record.name = name.clone();
            }
            if let Some(location) = &patch.location {
                record.location = location.clone();
            }
            record.updated_at = Utc::now();
            Ok(Some(record.clone()))
        }

        async fn delete(&self, scope: &TenantScope, id: Uuid) -> anyhow::Result<bool> {
            self.outage.check("relational")?;
            let mut data = self.data.write();
            let before = data.len();
            data.retain(|w| !(w.id == id && w.tenant_id == scope.tenant_id()));
            Ok(data.len() < before)
        }
    }

    #[derive(Clone, Default)]
    pub struct MockCategoryRepo {
        data: Arc<RwLock<Vec<Category>>>,
    }

    #[async_trait]
    impl CategoryRepository for MockCategoryRepo {
        async fn create(&self, scope: &TenantScope, new: &NewCategory) -> anyhow::Result<Category> {
            let now = Utc::now();
            let record = Category {
                id: Uuid::new_v4(),
                tenant_id: scope.tenant_id(),
                name: new.name.clone(),
                created_at: now,
                updated_at: now,
            };
            self.data.write().push(record.clone());
            Ok(record)
        }

        async fn list(&self, scope: &TenantScope) -> anyhow::Result<Vec<Category>> {
            Ok(self
                .data
                .read()
                .iter()
                .filter(|c| c.tenant_id == scope.tenant_id())
                .cloned()
                .collect())
        }

        async fn update(
            &self,
            scope: &TenantScope,
            id: Uuid,
            patch: &CategoryPatch,
        ) -> anyhow::Result<Option<Category>> {
            let mut data = self.data.write();
            let Some(record) = data
                .iter_mut()
                .find(|c| c.id == id && c.tenant_id == scope.tenant_id())
            else {
                return Ok(None);
            };
            if let Some(name) = &patch.name {
                record.name = name.clone();
            }
            record.updated_at = Utc::now();
            Ok(Some(record.clone()))
        }

        async fn delete(&self, scope: &TenantScope, id: Uuid) -> anyhow::Result<bool> {
            let mut data = self.data.write();
            let before = data.len();
            data.retain(|c| !(c.id == id && c.tenant_id == scope.tenant_id()));
            Ok(data.len() < before)
        }
    }

    #[derive(Clone, Default)]
    pub struct MockAccountRepo {
        users: Arc<RwLock<HashMap<String, User>>>,
        tenants: Arc<RwLock<Vec<Tenant>>>,
    }

    impl MockAccountRepo {
        pub fn tenant_count(&self) -> usize {
            self.tenants.read().len()
        }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepo {
        async fn register(&self, tenant: &Tenant, user: &User) -> anyhow::Result<bool> {
            let mut users = self.users.write();
            if users.contains_key(&user.email) {
                return Ok(false);
            }
            users.insert(user.email.clone(), user.clone());
            self.tenants.write().push(tenant.clone());
            Ok(true)
        }

        async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
            Ok(self.users.read().get(email).cloned())
        }
    }

    // ===== Document mock =====

    #[derive(Clone, Default)]
    pub struct MockItemRepo {
        data: Arc<RwLock<Vec<Item>>>,
        next_id: Arc<AtomicU64>,
        pub outage: Outage,
        /// Never complete any call, to exercise deadlines
        pub hang: Arc<AtomicBool>,
    }

    impl MockItemRepo {
        async fn gate(&self) -> anyhow::Result<()> {
            if self.hang.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            self.outage.check("document")
        }

        /// Every stored item regardless of tenant
        pub fn all(&self) -> Vec<Item> {
            self.data.read().clone()
        }
    }

    #[async_trait]
    impl ItemRepository for MockItemRepo {
        async fn create(&self, scope: &TenantScope, new: &NewItem) -> anyhow::Result<Item> {
            self.gate().await?;
            let seq = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let now = Utc::now();
            let item = Item {
                id: ItemId::parse(&format!("{:024x}", seq))?,
                tenant_id: scope.document_key(),
                warehouse_id: new.warehouse_id.clone(),
                category_id: new.category_id.clone(),
                name: new.name.clone(),
                description: new.description.clone(),
                sku: new.sku.clone(),
                quantity: new.quantity,
                price: new.price,
                images: new.images.clone(),
                attributes: new.attributes.clone(),
                created_at: now,
                updated_at: now,
            };
            self.data.write().push(item.clone());
            Ok(item)
        }

        async fn list(&self, scope: &TenantScope) -> anyhow::Result<Vec<Item>> {
            self.gate().await?;
            let key = scope.document_key();
            Ok(self
                .data
                .read()
                .iter()
                .filter(|i| i.tenant_id == key)
                .cloned()
                .collect())
        }

        async fn update(
            &self,
            scope: &TenantScope,
            id: &ItemId,
            patch: &ItemPatch,
        ) -> anyhow::Result<Option<Item>> {
            self.gate().await?;
            let key = scope.document_key();
            let mut data = self.data.write();
            let Some(item) = data.iter_mut().find(|i| &i.id == id && i.tenant_id == key) else {
                return Ok(None);
            };
            item.description = patch.description.clone();
            if let Some(v) = &patch.warehouse_id {
                item.warehouse_id = v.clone();
            }
            if let Some(v) = &patch.category_id {
                item.category_id = v.clone();
            }
            if let Some(v) = &patch.name {
                item.name = v.clone();
            }
            if let Some(v) = &patch.sku {
                item.sku = v.clone();
            }
            if let Some(v) = patch.quantity {
                item.quantity = v;
            }
            if let Some(v) = patch.price {
                item.price = v;
            }
            if let Some(v) = &patch.images {
                item.images = v.clone();
            }
            if let Some(v) = &patch.attributes {
                item.attributes = v.clone();
            }
            item.updated_at = Utc::now();
            Ok(Some(item.clone()))
        }

        async fn delete(&self, scope: &TenantScope, id: &ItemId) -> anyhow::Result<bool> {
            self.gate().await?;
            let key = scope.document_key();
            let mut data = self.data.write();
            let before = data.len();
            data.retain(|i| !(&i.id == id && i.tenant_id == key));
            Ok(data.len() < before)
        }
    }

    // ===== Counter store mock =====

    /// Fixed-window counters on the tokio clock, so paused-time tests can
    /// advance past a window.
    #[derive(Clone, Default)]
    pub struct MockCounterStore {
        counters: Arc<RwLock<HashMap<String, (u64, Option<tokio::time::Instant>)>>>,
        /// Silently ignore EXPIRE, as if the call was lost
        pub drop_expire: Arc<AtomicBool>,
        /// Answer every TTL query with this value instead of the tracked expiry
        pub forced_ttl: Arc<RwLock<Option<WindowTtl>>>,
        pub outage: Outage,
        expire_calls: Arc<AtomicU64>,
    }

    impl MockCounterStore {
        pub fn expire_calls(&self) -> u64 {
            self.expire_calls.load(Ordering::SeqCst)
        }

        pub fn count(&self, key: &str) -> Option<u64> {
            self.counters.read().get(key).map(|(count, _)| *count)
        }

        fn evict_expired(map: &mut HashMap<String, (u64, Option<tokio::time::Instant>)>, key: &str) {
            let now = tokio::time::Instant::now();
            if let Some((_, Some(deadline))) = map.get(key) {
                if *deadline <= now {
                    map.remove(key);
                }
            }
        }
    }

    #[async_trait]
    impl CounterStore for MockCounterStore {
        async fn increment(&self, key: &str) -> anyhow::Result<u64> {
            self.outage.check("counter")?;
            let mut map = self.counters.write();
            Self::evict_expired(&mut map, key);
            let entry = map.entry(key.to_string()).or_insert((0, None));
            entry.0 += 1;
            Ok(entry.0)
        }

        async fn expire(&self, key: &str, ttl: Duration) -> anyhow::Result<()> {
            self.outage.check("counter")?;
            self.expire_calls.fetch_add(1, Ordering::SeqCst);
            if self.drop_expire.load(Ordering::SeqCst) {
                return Ok(());
            }
            let mut map = self.counters.write();
            if let Some(entry) = map.get_mut(key) {
                entry.1 = Some(tokio::time::Instant::now() + ttl);
            }
            Ok(())
        }

        async fn time_to_live(&self, key: &str) -> anyhow::Result<WindowTtl> {
            self.outage.check("counter")?;
            if let Some(ttl) = *self.forced_ttl.read() {
                return Ok(ttl);
            }
            let mut map = self.counters.write();
            Self::evict_expired(&mut map, key);
            Ok(match map.get(key) {
                None => WindowTtl::Missing,
                Some((_, None)) => WindowTtl::NoExpiry,
                Some((_, Some(deadline))) => WindowTtl::Remaining(
                    deadline.saturating_duration_since(tokio::time::Instant::now()),
                ),
            })
        }
    }

    // ===== Publisher mock =====

    #[derive(Clone, Default)]
    pub struct RecordingPublisher {
        jobs: Arc<RwLock<Vec<AnalysisJob>>>,
        pub outage: Outage,
        pub hang: Arc<AtomicBool>,
    }

    impl RecordingPublisher {
        pub fn published(&self) -> Vec<AnalysisJob> {
            self.jobs.read().clone()
        }
    }

    #[async_trait]
    impl JobPublisher for RecordingPublisher {
        async fn publish(&self, job: &AnalysisJob) -> anyhow::Result<()> {
            if self.hang.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            self.outage.check("queue")?;
            self.jobs.write().push(job.clone());
            Ok(())
        }
    }
}

/// All mocks backing one service instance
#[derive(Clone, Default)]
pub struct Harness {
    pub warehouses: mocks::MockWarehouseRepo,
    pub categories: mocks::MockCategoryRepo,
    pub items: mocks::MockItemRepo,
    pub accounts: mocks::MockAccountRepo,
    pub counter: mocks::MockCounterStore,
    pub publisher: mocks::RecordingPublisher,
}

impl Harness {
    pub fn repositories(&self) -> Repositories {
        Repositories {
            warehouses: Arc::new(self.warehouses.clone()),
            categories: Arc::new(self.categories.clone()),
            items: Arc::new(self.items.clone()),
            accounts: Arc::new(self.accounts.clone()),
        }
    }

    pub fn tokens(&self) -> Arc<dyn TokenCodec> {
        Arc::new(JwtCodec::new(TEST_SECRET))
    }

    pub fn service(&self, config: Config) -> Service {
        Service::new(
            self.repositories(),
            Arc::new(self.publisher.clone()),
            self.tokens(),
            config,
        )
    }

    pub fn module(&self, config: Config) -> InventoryServiceModule {
        InventoryServiceModule::from_parts(
            config,
            self.repositories(),
            Arc::new(self.publisher.clone()),
            self.tokens(),
            Some(Arc::new(self.counter.clone())),
        )
    }
}

/// Config with a cheap bcrypt cost for tests
pub fn test_config() -> Config {
    Config {
        password_cost: 4,
        ..Config::default()
    }
}
