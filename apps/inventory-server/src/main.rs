//! InventoryAI server entry point.
//!
//! Loads configuration, connects the backing stores, mounts the inventory
//! service routes and serves until Ctrl-C.

mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, ServerConfig, DEFAULT_JWT_SECRET};
use inventory_service::domain::admission::CounterStore;
use inventory_service::domain::jobs::{DisconnectedPublisher, JobPublisher};
use inventory_service::infra::counter::RedisCounterStore;
use inventory_service::infra::queue::AmqpJobPublisher;
use inventory_service::{Backends, InventoryServiceModule};
use mongodb::bson::doc;
use sea_orm::{Database, DatabaseConnection};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "inventory-server", about = "Multi-tenant inventory API")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", serde_yaml::to_string(&config.redacted())?);
        return Ok(());
    }

    logging::init(&config.logging)?;
    run(config).await
}

async fn run(config: AppConfig) -> Result<()> {
    let server = &config.server;
    if server.jwt_secret == DEFAULT_JWT_SECRET {
        tracing::warn!("using the built-in JWT secret, set JWT_SECRET in production");
    }

    let db = connect_database(server).await?;
    InventoryServiceModule::migrate(&db)
        .await
        .context("relational schema migration failed")?;

    let documents = connect_documents(server, &config.service.mongo_database).await?;
    let counter = connect_counter(server).await;
    let publisher = connect_publisher(server, &config.service.queue_name).await;

    let module = InventoryServiceModule::new(
        config.service.clone(),
        Backends {
            db: Arc::new(db),
            documents,
            counter,
            publisher,
            jwt_secret: server.jwt_secret.clone(),
        },
    );
    let app = module.register_rest(axum::Router::new());

    let addr: SocketAddr = format!("{}:{}", server.bind_addr, server.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", server.bind_addr, server.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "inventory server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("inventory server stopped");
    Ok(())
}

async fn connect_database(server: &ServerConfig) -> Result<DatabaseConnection> {
    let attempts = server.db_connect_attempts.max(1);
    let mut attempt = 1;
    loop {
        match Database::connect(server.database_url.as_str()).await {
            Ok(db) => {
                tracing::info!("connected to relational store");
                return Ok(db);
            }
            Err(e) if attempt < attempts => {
                tracing::warn!(attempt, attempts, error = %e, "relational store not ready, retrying");
                tokio::time::sleep(server.db_connect_delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(e).context(format!(
                    "could not connect to relational store after {} attempts",
                    attempts
                ))
            }
        }
    }
}

async fn connect_documents(server: &ServerConfig, database: &str) -> Result<mongodb::Database> {
    let client = mongodb::Client::with_uri_str(&server.mongo_uri)
        .await
        .context("invalid document store URI")?;
    let db = client.database(database);

    // The driver connects lazily, an unreachable server only degrades item routes
    match db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => tracing::info!("connected to document store"),
        Err(e) => tracing::warn!(error = %e, "document store ping failed"),
    }
    Ok(db)
}

async fn connect_counter(server: &ServerConfig) -> Option<Arc<dyn CounterStore>> {
    if server.redis_url.is_empty() {
        return None;
    }
    match RedisCounterStore::connect(&server.redis_url).await {
        Ok(store) => {
            tracing::info!("connected to counter store");
            Some(Arc::new(store))
        }
        Err(e) => {
            tracing::warn!(error = %e, "counter store unavailable");
            None
        }
    }
}

async fn connect_publisher(server: &ServerConfig, queue: &str) -> Arc<dyn JobPublisher> {
    match AmqpJobPublisher::connect(&server.rabbitmq_url, queue).await {
        Ok(publisher) => {
            tracing::info!(queue, "connected to work queue");
            Arc::new(publisher)
        }
        Err(e) => {
            tracing::warn!(error = %e, "work queue unavailable, analysis requests will fail");
            Arc::new(DisconnectedPublisher)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
