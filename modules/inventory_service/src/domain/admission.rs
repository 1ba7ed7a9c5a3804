//! Fixed-window admission control
//!
//! The counter state lives in an external [`CounterStore`] shared by every
//! service instance; the controller itself is stateless.

use crate::config::RateLimitConfig;
use crate::contract::InventoryError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const MIN_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Shared atomic counters with expiry
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment `key` (creating it at 0) and return the new value
    async fn increment(&self, key: &str) -> anyhow::Result<u64>;

    /// Set the time-to-live of `key`
    async fn expire(&self, key: &str, ttl: Duration) -> anyhow::Result<()>;

    /// Remaining time-to-live of `key`
    async fn time_to_live(&self, key: &str) -> anyhow::Result<WindowTtl>;
}

/// Expiry state of a counter key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowTtl {
    /// Time left until the key expires, possibly zero
    Remaining(Duration),
    /// The key exists without an expiry
    NoExpiry,
    /// The key expired or never existed
    Missing,
}

/// Who a request is counted against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    User(Uuid),
    Ip(String),
}

impl Identity {
    /// Counter key, `rate_limit:<kind>:<identifier>`
    pub fn key(&self) -> String {
        match self {
            Identity::User(id) => format!("rate_limit:user:{}", id),
            Identity::Ip(addr) => format!("rate_limit:ip:{}", addr),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::User(id) => write!(f, "user:{}", id),
            Identity::Ip(addr) => write!(f, "ip:{}", addr),
        }
    }
}

/// Fixed-window rate limiter
#[derive(Clone)]
pub struct AdmissionController {
    store: Arc<dyn CounterStore>,
    limit: u64,
    window: Duration,
    deadline: Duration,
}

impl AdmissionController {
    pub fn new(store: Arc<dyn CounterStore>, config: &RateLimitConfig, deadline: Duration) -> Self {
        Self {
            store,
            limit: config.limit,
            window: config.window,
            deadline,
        }
    }

    /// Count one request against `identity`.
    ///
    /// Increment and check are a single atomic step at the store, so
    /// concurrent callers on any instance never both observe the same count.
    pub async fn admit(&self, identity: &Identity) -> Result<(), InventoryError> {
        let key = identity.key();

        let count = self
            .bounded(self.store.increment(&key))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %key, "admission counter increment failed");
                InventoryError::StoreUnavailable { store: "counter" }
            })?;

        if count == 1 {
            // Losing this race leaves a key without expiry; the rejection
            // path below re-applies it.
            if let Err(e) = self.bounded(self.store.expire(&key, self.window)).await {
                tracing::warn!(error = %e, key = %key, "failed to start admission window");
            }
        }

        if count <= self.limit {
            return Ok(());
        }

        let retry_after = self.retry_after(&key).await;
        tracing::debug!(
            identity = %identity,
            count,
            limit = self.limit,
            retry_after_secs = retry_after.as_secs(),
            "request rejected by admission control"
        );
        Err(InventoryError::RateLimited { retry_after })
    }

    async fn retry_after(&self, key: &str) -> Duration {
        match self.bounded(self.store.time_to_live(key)).await {
            Ok(WindowTtl::Remaining(ttl)) => whole_seconds(ttl),
            // Expired since the increment, the next window is about to start
            Ok(WindowTtl::Missing) => MIN_RETRY_AFTER,
            Ok(WindowTtl::NoExpiry) => {
                if let Err(e) = self.bounded(self.store.expire(key, self.window)).await {
                    tracing::warn!(error = %e, key = %key, "failed to repair admission window");
                }
                self.window
            }
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "failed to read admission window");
                self.window
            }
        }
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = anyhow::Result<T>>,
    ) -> anyhow::Result<T> {
        tokio::time::timeout(self.deadline, fut)
            .await
            .map_err(|_| anyhow::anyhow!("counter store deadline of {:?} exceeded", self.deadline))?
    }
}

/// Round up to whole seconds, never below [`MIN_RETRY_AFTER`]
fn whole_seconds(ttl: Duration) -> Duration {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    Duration::from_secs(secs).max(MIN_RETRY_AFTER)
}
