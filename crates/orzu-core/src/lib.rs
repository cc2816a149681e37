//! Shared service plumbing: health endpoints, tracing setup, request-id
//! middleware, and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
