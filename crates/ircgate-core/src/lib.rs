//! Shared ambient helpers for ircgate services: health endpoints,
//! tracing setup, and common HTTP middleware.

pub mod health;
pub mod middleware;
pub mod tracing;
