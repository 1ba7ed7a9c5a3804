//! Redis-backed admission counters

use crate::domain::admission::{CounterStore, WindowTtl};
use anyhow::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

/// Counter store on a shared, auto-reconnecting Redis connection
#[derive(Clone)]
pub struct RedisCounterStore {
    conn: ConnectionManager,
}

impl RedisCounterStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Open a connection manager for `url`
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        let count: u64 = conn.incr(key, 1u64).await?;
        Ok(count)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let seconds = i64::try_from(ttl.as_secs().max(1))?;
        let _: bool = conn.expire(key, seconds).await?;
        Ok(())
    }

    async fn time_to_live(&self, key: &str) -> Result<WindowTtl> {
        let mut conn = self.conn.clone();
        let millis: i64 = conn.pttl(key).await?;
        Ok(window_ttl(millis))
    }
}

/// Interpret a `PTTL` reply: -1 is a key without expiry, -2 a missing key
fn window_ttl(millis: i64) -> WindowTtl {
    match millis {
        -1 => WindowTtl::NoExpiry,
        ms if ms < 0 => WindowTtl::Missing,
        ms => WindowTtl::Remaining(Duration::from_millis(ms.unsigned_abs())),
    }
}
