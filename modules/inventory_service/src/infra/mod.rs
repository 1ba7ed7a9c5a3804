//! Infrastructure adapters for the domain ports

pub mod auth;
pub mod counter;
pub mod documents;
pub mod queue;
pub mod storage;
