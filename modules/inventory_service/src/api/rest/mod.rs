//! REST API layer

pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod middleware;
pub mod routes;

pub use middleware::RequestGate;
pub use routes::{register_routes, API_PREFIX};
