//! User record model: tenant memberships and the active-tenant pointer.
//!
//! # Invariants
//! - Membership ids are unique within a record's `customers` list.
//! - `customers` is append-only (join order is preserved; no removal).
//! - `active`, when set, names the id of some entry in `customers`. A record
//!   that violates this (stale data) is treated as unauthorized by the
//!   decision engine, never auto-healed.

use serde::{Deserialize, Serialize};

use crate::id::{RoleName, TenantId, UserId};

/// A user's membership in one tenant, with the roles granted there.
///
/// Roles are order-insensitive and may be empty. They are replaced wholesale
/// by the role-update operation, never incrementally diffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantMembership {
    pub id: TenantId,
    pub roles: Vec<RoleName>,
}

/// Pointer to the tenant context currently selected for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTenant {
    pub customer_id: TenantId,
}

/// Optional display fields for a user.
///
/// Modeled as an explicit optional-field struct so the request context's
/// shape stays statically verifiable; absent fields are omitted from wire
/// output entirely, never emitted as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// A registered user and their tenant memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<UserDetails>,
    pub customers: Vec<TenantMembership>,
    /// Null only before the user's first join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<ActiveTenant>,
}

impl UserRecord {
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            details: None,
            customers: Vec::new(),
            active: None,
        }
    }

    /// Locate a membership by tenant id (id scan, never positional).
    pub fn membership(&self, tenant_id: &TenantId) -> Option<&TenantMembership> {
        self.customers.iter().find(|m| &m.id == tenant_id)
    }

    pub fn membership_mut(&mut self, tenant_id: &TenantId) -> Option<&mut TenantMembership> {
        self.customers.iter_mut().find(|m| &m.id == tenant_id)
    }

    pub fn has_membership(&self, tenant_id: &TenantId) -> bool {
        self.membership(tenant_id).is_some()
    }

    /// The membership selected by the active-tenant pointer.
    ///
    /// Returns `None` when the pointer is unset *or* dangling (names a tenant
    /// absent from `customers`). Callers must not guess an active tenant.
    pub fn active_membership(&self) -> Option<&TenantMembership> {
        let active = self.active.as_ref()?;
        self.membership(&active.customer_id)
    }
}
