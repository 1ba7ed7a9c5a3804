//! Request gate: tenant context resolution followed by admission control

use super::error::{map_domain_error, Problem};
use crate::contract::{InventoryError, TenantContext};
use crate::domain::admission::{AdmissionController, Identity};
use crate::domain::tenancy::TenantContextResolver;
use axum::{
    extract::{ConnectInfo, FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

/// Shared state of the request gate
#[derive(Clone)]
pub struct RequestGate {
    pub resolver: TenantContextResolver,
    /// `None` when no counter store is available (admission disabled)
    pub admission: Option<AdmissionController>,
}

/// Resolve the caller and count the request against its identity.
///
/// A request without credentials passes through unauthenticated and is
/// counted by network origin; handlers that need a tenant reject it through
/// the [`TenantContext`] extractor. A credential that fails verification is
/// rejected here.
pub async fn gate_request(
    State(gate): State<RequestGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default().to_string());

    let context = match authorization {
        Some(value) => match gate.resolver.resolve(Some(&value)) {
            Ok(ctx) => Some(ctx),
            Err(e) => return map_domain_error(e).into_response(),
        },
        None => None,
    };

    if let Some(admission) = &gate.admission {
        let identity = match &context {
            Some(ctx) => Identity::User(ctx.user_id),
            None => Identity::Ip(client_ip(&request)),
        };
        if let Err(e) = admission.admit(&identity).await {
            return map_domain_error(e).into_response();
        }
    }

    if let Some(ctx) = context {
        request.extensions_mut().insert(ctx);
    }
    next.run(request).await
}

fn client_ip(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or_else(|| {
                map_domain_error(InventoryError::unauthenticated(
                    "missing bearer credential",
                ))
            })
    }
}
