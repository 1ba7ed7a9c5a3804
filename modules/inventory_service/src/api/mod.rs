//! Transport adapters

pub mod rest;
