//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::InventoryError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Seconds until admission is possible again (429 only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            retry_after_seconds: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after_seconds = Some(seconds);
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let retry_after = self.retry_after_seconds;
        let mut response = (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response();
        if let Some(seconds) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
        }
        response
    }
}

impl From<InventoryError> for Problem {
    fn from(error: InventoryError) -> Self {
        map_domain_error(error)
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: InventoryError) -> Problem {
    match error {
        InventoryError::InvalidArgument { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Invalid Argument").with_detail(message)
        }

        InventoryError::Unauthenticated { reason } => {
            Problem::new(StatusCode::UNAUTHORIZED, "Unauthenticated").with_detail(reason)
        }

        InventoryError::MissingTenant => Problem::new(StatusCode::FORBIDDEN, "Missing Tenant")
            .with_detail("The credential does not identify a tenant"),

        InventoryError::NotFound { resource, id } => Problem::new(
            StatusCode::NOT_FOUND,
            format!("{} Not Found", resource),
        )
        .with_detail(format!("{} with id '{}' was not found", resource, id)),

        InventoryError::RateLimited { retry_after } => {
            let seconds = retry_after.as_secs().max(1);
            Problem::new(StatusCode::TOO_MANY_REQUESTS, "Rate Limit Exceeded")
                .with_detail(format!("Retry after {} seconds", seconds))
                .with_retry_after(seconds)
        }

        InventoryError::StoreUnavailable { store } => Problem::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Service Unavailable",
        )
        .with_detail(format!("The {} store is temporarily unavailable", store)),

        InventoryError::EnqueueFailed { .. } => Problem::new(
            StatusCode::BAD_GATEWAY,
            "Enqueue Failed",
        )
        .with_detail("The job could not be handed to the work queue"),

        InventoryError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        InventoryError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}
