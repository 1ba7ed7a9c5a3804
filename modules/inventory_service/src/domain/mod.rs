//! Domain layer - business logic and services

pub mod admission;
pub mod jobs;
pub mod repository;
pub mod service;
pub mod tenancy;
pub mod validation;

pub use admission::{AdmissionController, CounterStore, Identity, WindowTtl};
pub use jobs::{AnalysisJob, DisconnectedPublisher, JobPublisher};
pub use repository::{AccountRepository, CategoryRepository, ItemRepository, WarehouseRepository};
pub use service::{Repositories, Service, Session};
pub use tenancy::{Claims, TenantContextResolver, TokenCodec};
