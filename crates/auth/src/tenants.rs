//! Tenant membership mutators: join a tenant, switch the active tenant,
//! replace a membership's roles.
//!
//! Each operation is invoked independently by tenant-management API calls,
//! never on the per-request decision path. Preconditions are checked against
//! a fresh read before any write; concurrent role replacements are
//! last-write-wins.

use thiserror::Error;

use gatehouse_core::{RoleName, TenantId, TenantMembership, UserId};
use gatehouse_store::{AuthStore, StoreError};

/// Membership mutation failures.
///
/// `NotRegistered`/`RecordMissing` distinguish "no such caller" from
/// `UnknownTenant` ("caller is not a member"), but none of these reveal
/// whether a tenant id itself exists anywhere.
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("the caller is not a registered user")]
    NotRegistered,

    #[error("the caller is not a member of the provided customer id")]
    UnknownTenant,

    #[error("the user record no longer exists")]
    RecordMissing,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Join a tenant (idempotent).
///
/// A membership with `tenant_id` already present makes this a no-op success.
/// Otherwise the membership is appended with the given roles; when
/// `make_active` is set the active pointer moves in the same mutation.
pub async fn add_tenant(
    store: &dyn AuthStore,
    user_id: &UserId,
    tenant_id: TenantId,
    roles: Vec<RoleName>,
    make_active: bool,
) -> Result<(), MembershipError> {
    let user = store
        .get_user(user_id)
        .await?
        .ok_or(MembershipError::NotRegistered)?;

    if user.has_membership(&tenant_id) {
        tracing::debug!(user = %user_id, tenant = %tenant_id, "tenant already joined");
        return Ok(());
    }

    store
        .append_membership(user_id, TenantMembership { id: tenant_id, roles }, make_active)
        .await?;
    Ok(())
}

/// Select a different tenant as the user's active context.
///
/// Switching to the currently active tenant succeeds trivially without
/// touching the store. Switching to a tenant the user has not joined fails
/// with `UnknownTenant` before any mutation.
pub async fn switch_active_tenant(
    store: &dyn AuthStore,
    user_id: &UserId,
    requested: &TenantId,
    current_active: Option<&TenantId>,
) -> Result<(), MembershipError> {
    if current_active == Some(requested) {
        return Ok(());
    }

    let user = store
        .get_user(user_id)
        .await?
        .ok_or(MembershipError::NotRegistered)?;

    if !user.has_membership(requested) {
        tracing::warn!(user = %user_id, "caller is not associated to the requested customer");
        return Err(MembershipError::UnknownTenant);
    }

    store.set_active_tenant(user_id, requested).await?;
    Ok(())
}

/// Replace a membership's role set wholesale.
///
/// The membership is located by tenant id, never by assumed position. The
/// store write is guarded by a record-existence precondition; a condition
/// failure means the record vanished between read and write. Two concurrent
/// replacements both succeed with last-write-wins semantics.
pub async fn update_tenant_roles(
    store: &dyn AuthStore,
    user_id: &UserId,
    tenant_id: &TenantId,
    roles: Vec<RoleName>,
) -> Result<(), MembershipError> {
    let user = store
        .get_user(user_id)
        .await?
        .ok_or(MembershipError::NotRegistered)?;

    if !user.has_membership(tenant_id) {
        tracing::warn!(user = %user_id, "caller is not associated to the requested customer");
        return Err(MembershipError::UnknownTenant);
    }

    match store.replace_membership_roles(user_id, tenant_id, roles).await {
        Ok(()) => Ok(()),
        Err(StoreError::ConditionFailed) => Err(MembershipError::RecordMissing),
        Err(err) => Err(err.into()),
    }
}
