//! Module declaration: wiring of adapters, domain service and REST routes

use crate::api::rest::{register_routes, RequestGate};
use crate::config::Config;
use crate::domain::admission::{AdmissionController, CounterStore};
use crate::domain::jobs::JobPublisher;
use crate::domain::tenancy::{TenantContextResolver, TokenCodec};
use crate::domain::{Repositories, Service};
use crate::infra::auth::JwtCodec;
use crate::infra::documents::MongoItemRepository;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    SeaOrmAccountRepository, SeaOrmCategoryRepository, SeaOrmWarehouseRepository,
};
use anyhow::Result;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Connected backing services
pub struct Backends {
    /// Relational store
    pub db: Arc<DatabaseConnection>,
    /// Document store database holding the items collection
    pub documents: mongodb::Database,
    /// Shared counters; `None` disables admission control
    pub counter: Option<Arc<dyn CounterStore>>,
    /// Work queue publisher
    pub publisher: Arc<dyn JobPublisher>,
    /// HS256 signing secret
    pub jwt_secret: String,
}

/// Inventory service module
pub struct InventoryServiceModule {
    service: Arc<Service>,
    gate: RequestGate,
}

impl InventoryServiceModule {
    /// Build the module on top of connected backends
    pub fn new(config: Config, backends: Backends) -> Self {
        let repos = Repositories {
            warehouses: Arc::new(SeaOrmWarehouseRepository::new(backends.db.clone())),
            categories: Arc::new(SeaOrmCategoryRepository::new(backends.db.clone())),
            accounts: Arc::new(SeaOrmAccountRepository::new(backends.db)),
            items: Arc::new(MongoItemRepository::new(
                &backends.documents,
                &config.items_collection,
            )),
        };
        let tokens: Arc<dyn TokenCodec> = Arc::new(JwtCodec::new(&backends.jwt_secret));

        Self::from_parts(config, repos, backends.publisher, tokens, backends.counter)
    }

    /// Build the module from already constructed ports
    pub fn from_parts(
        config: Config,
        repos: Repositories,
        publisher: Arc<dyn JobPublisher>,
        tokens: Arc<dyn TokenCodec>,
        counter: Option<Arc<dyn CounterStore>>,
    ) -> Self {
        let admission = counter.map(|store| {
            AdmissionController::new(store, &config.rate_limit, config.store_timeout)
        });
        if admission.is_none() {
            tracing::warn!("no counter store configured, admission control disabled");
        }

        let gate = RequestGate {
            resolver: TenantContextResolver::new(tokens.clone()),
            admission,
        };
        let service = Arc::new(Service::new(repos, publisher, tokens, config));

        tracing::info!("Inventory service initialized");
        Self { service, gate }
    }

    /// Create or upgrade the relational schema
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Inventory service migrations completed");
        Ok(())
    }

    /// Mount the REST API on `router`
    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        tracing::info!("Registering inventory service REST routes");
        register_routes(router, self.service.clone(), self.gate.clone())
    }
}
