//! `gatehouse-api` — HTTP surface for the authorization core.
//!
//! Maps the decision engine and the membership mutators onto axum routes:
//! the auth middleware runs a full authorization decision per request and
//! injects the resulting context; the tenant-management endpoints expose the
//! three mutators with their 204/403/409/500 status conventions.

pub mod app;
pub mod context;
pub mod middleware;
