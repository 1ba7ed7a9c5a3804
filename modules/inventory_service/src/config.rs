//! Configuration for inventory service module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Inventory service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Admission control window
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Deadline for every relational, document and counter store call
    #[serde(default = "default_store_timeout", with = "humantime_serde")]
    pub store_timeout: Duration,

    /// Deadline for handing a job to the work queue
    #[serde(default = "default_enqueue_timeout", with = "humantime_serde")]
    pub enqueue_timeout: Duration,

    /// Lifetime of issued access tokens
    #[serde(default = "default_token_ttl", with = "humantime_serde")]
    pub token_ttl: Duration,

    /// bcrypt cost for password hashes
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,

    /// Durable queue receiving analysis jobs
    #[serde(default = "default_queue_name")]
    pub queue_name: String,

    /// Document store database name
    #[serde(default = "default_mongo_database")]
    pub mongo_database: String,

    /// Document store collection holding items
    #[serde(default = "default_items_collection")]
    pub items_collection: String,

    /// Maximum encoded size of an item's attributes
    #[serde(default = "default_max_attributes_bytes")]
    pub max_attributes_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            store_timeout: default_store_timeout(),
            enqueue_timeout: default_enqueue_timeout(),
            token_ttl: default_token_ttl(),
            password_cost: default_password_cost(),
            queue_name: default_queue_name(),
            mongo_database: default_mongo_database(),
            items_collection: default_items_collection(),
            max_attributes_bytes: default_max_attributes_bytes(),
        }
    }
}

/// Fixed-window limit per identity
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    #[serde(default = "default_limit")]
    pub limit: u64,

    /// Window length
    #[serde(default = "default_window", with = "humantime_serde")]
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            window: default_window(),
        }
    }
}

fn default_limit() -> u64 {
    100
}

fn default_window() -> Duration {
    Duration::from_secs(60)
}

fn default_store_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_enqueue_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_token_ttl() -> Duration {
    Duration::from_secs(72 * 60 * 60)
}

fn default_password_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_queue_name() -> String {
    "image_processing_queue".to_string()
}

fn default_mongo_database() -> String {
    "inventory_ai".to_string()
}

fn default_items_collection() -> String {
    "items".to_string()
}

fn default_max_attributes_bytes() -> usize {
    64 * 1024 // 64KB
}
