//! Tenant context resolution
//!
//! Turns the bearer credential of an inbound request into a [`TenantContext`].
//! Signature and expiry checks are delegated to a [`TokenCodec`].

use crate::contract::{InventoryError, TenantContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Claim set carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    /// Absent for credentials issued outside a tenant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    pub role: String,
    /// Expiry as unix seconds
    pub exp: i64,
}

impl Claims {
    pub fn new(context: &TenantContext, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: context.user_id,
            tenant_id: context.tenant_id,
            role: context.role.clone(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn into_context(self) -> TenantContext {
        TenantContext {
            tenant_id: self.tenant_id,
            user_id: self.user_id,
            role: self.role,
        }
    }
}

/// Signs and verifies access tokens
pub trait TokenCodec: Send + Sync {
    /// Sign a claim set into a compact token
    fn issue(&self, claims: &Claims) -> anyhow::Result<String>;

    /// Verify signature and expiry, returning the claims
    fn verify(&self, token: &str) -> anyhow::Result<Claims>;
}

/// Resolves request credentials into tenant contexts
#[derive(Clone)]
pub struct TenantContextResolver {
    codec: Arc<dyn TokenCodec>,
}

impl TenantContextResolver {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }

    /// Resolve the value of an `Authorization` header.
    ///
    /// Absent, malformed or unverifiable credentials yield
    /// [`InventoryError::Unauthenticated`]. A verified credential without a
    /// tenant resolves to a context whose `scope()` fails.
    pub fn resolve(&self, authorization: Option<&str>) -> Result<TenantContext, InventoryError> {
        let header = authorization
            .ok_or_else(|| InventoryError::unauthenticated("missing authorization header"))?;
        let token = bearer_token(header).ok_or_else(|| {
            InventoryError::unauthenticated("authorization header is not a bearer credential")
        })?;

        let claims = self.codec.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "credential rejected");
            InventoryError::unauthenticated("invalid or expired token")
        })?;

        Ok(claims.into_context())
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
