//! Contract error types for inventory service
//!
//! These errors are transport-agnostic. The REST layer maps them to
//! RFC-9457 problem details in `api::rest::error`.

use std::time::Duration;

/// Inventory service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// Malformed identifier or missing required field
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input
        message: String,
    },

    /// Credential missing, malformed or rejected by verification
    #[error("unauthenticated: {reason}")]
    Unauthenticated {
        /// Why the credential was rejected
        reason: String,
    },

    /// A data operation was attempted without a resolved tenant
    #[error("no tenant resolved for request")]
    MissingTenant,

    /// Well-formed identifier with no record under the caller's tenant
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource kind (warehouse, category, item)
        resource: &'static str,
        /// Identifier as supplied by the caller
        id: String,
    },

    /// Admission denied for the current window
    #[error("rate limit exceeded, retry after {}s", .retry_after.as_secs())]
    RateLimited {
        /// Time until the window resets
        retry_after: Duration,
    },

    /// Backing store failed or exceeded its deadline
    #[error("{store} store unavailable")]
    StoreUnavailable {
        /// Which store (relational, document, counter)
        store: &'static str,
    },

    /// Work offload publish did not complete
    #[error("enqueue failed: {reason}")]
    EnqueueFailed {
        /// Broker-side failure description
        reason: String,
    },

    /// Uniqueness violation (e.g. email already registered)
    #[error("conflict: {reason}")]
    Conflict {
        /// Conflict reason
        reason: String,
    },

    /// Unexpected failure that is not the caller's fault
    #[error("internal error")]
    Internal,
}

impl InventoryError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated {
            reason: reason.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
