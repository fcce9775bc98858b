//! `gatehouse-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the user/membership record model, and the role
//! catalog model. Storage, token handling, and HTTP live in other crates.

pub mod catalog;
pub mod id;
pub mod user;

pub use catalog::{RoleCatalog, RoleDefinition, RolePaths, RouteGrant};
pub use id::{RoleName, TenantId, UserId};
pub use user::{ActiveTenant, TenantMembership, UserDetails, UserRecord};
