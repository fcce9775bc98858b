//! The `AuthStore` boundary: user records and the global role catalog.

use async_trait::async_trait;

use gatehouse_core::{RoleCatalog, RoleName, TenantId, TenantMembership, UserId, UserRecord};

use crate::error::StoreError;

/// Record store consumed by the decision engine and the membership mutators.
///
/// Lookup misses are `Ok(None)`, not errors: "no record" means "caller is not
/// a registered user" and the caller decides how to react. Mutations carry
/// their own precondition semantics; business rules (idempotent join, member
/// checks) stay with the mutators, not here.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Pure lookup of a user record.
    async fn get_user(&self, user_id: &UserId) -> Result<Option<UserRecord>, StoreError>;

    /// Replace (or create) a user record wholesale. Registration seam; the
    /// decision path never calls this.
    async fn put_user(&self, record: UserRecord) -> Result<(), StoreError>;

    /// Append a membership to the user's `customers` list, optionally setting
    /// the active pointer in the same mutation.
    ///
    /// The append and the pointer set are atomic: both happen or neither
    /// does. Fails with `ConditionFailed` if the record does not exist.
    async fn append_membership(
        &self,
        user_id: &UserId,
        membership: TenantMembership,
        make_active: bool,
    ) -> Result<(), StoreError>;

    /// Point `active.customerId` at the given tenant.
    ///
    /// Fails with `ConditionFailed` if the record does not exist. Membership
    /// validation is the caller's precondition, not enforced here.
    async fn set_active_tenant(
        &self,
        user_id: &UserId,
        tenant_id: &TenantId,
    ) -> Result<(), StoreError>;

    /// Replace the role list of the membership with the given tenant id.
    ///
    /// The membership slot is located by id scan, never by assumed position.
    /// Fails with `ConditionFailed` if the record or the membership no longer
    /// exists at write time. Two concurrent replacements both succeed with
    /// last-write-wins semantics.
    async fn replace_membership_roles(
        &self,
        user_id: &UserId,
        tenant_id: &TenantId,
        roles: Vec<RoleName>,
    ) -> Result<(), StoreError>;

    /// Read the single global role catalog record, if configured.
    async fn get_role_catalog(&self) -> Result<Option<RoleCatalog>, StoreError>;

    /// Replace the global role catalog wholesale.
    async fn put_role_catalog(&self, catalog: RoleCatalog) -> Result<(), StoreError>;
}
