//! `gatehouse-auth` — the authorization decision engine.
//!
//! Per-request path: verify the bearer credential, resolve the caller's
//! active tenant membership, expand its roles through the global catalog,
//! consolidate allow/deny path sets, and assemble a decision document.
//! Tenant-membership mutations (join, switch active, replace roles) live
//! here too since the engine depends on their invariants for correctness.
//!
//! This crate is intentionally decoupled from HTTP framing; `gatehouse-api`
//! maps outcomes to status codes.

pub mod catalog;
pub mod decision;
pub mod policy;
pub mod tenants;
pub mod verifier;

pub use catalog::{resolve_roles, seed_catalog};
pub use decision::{
    Authorizer, DecisionDocument, Effect, PolicyDocument, PolicyStatement, RequestContext,
    Unauthorized,
};
pub use policy::{consolidate, ConsolidatedPolicy};
pub use tenants::{add_tenant, switch_active_tenant, update_tenant_roles, MembershipError};
pub use verifier::{CredentialError, CredentialVerifier};
