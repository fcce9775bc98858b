//! In-memory `AuthStore` used by tests and the dev server.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gatehouse_core::{RoleCatalog, RoleName, TenantId, TenantMembership, UserId, UserRecord};

use crate::auth_store::AuthStore;
use crate::error::StoreError;

/// `AuthStore` backed by process memory.
///
/// Mutation preconditions match what a conditional-update store would
/// enforce, so mutator tests exercise the same failure paths as production.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, UserRecord>>,
    catalog: RwLock<Option<RoleCatalog>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthStore for InMemoryStore {
    async fn get_user(&self, user_id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn put_user(&self, record: UserRecord) -> Result<(), StoreError> {
        self.users.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn append_membership(
        &self,
        user_id: &UserId,
        membership: TenantMembership,
        make_active: bool,
    ) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(user_id).ok_or(StoreError::ConditionFailed)?;

        // Both fields change together under the one write lock.
        let tenant_id = membership.id.clone();
        record.customers.push(membership);
        if make_active {
            record.active = Some(gatehouse_core::ActiveTenant {
                customer_id: tenant_id,
            });
        }
        Ok(())
    }

    async fn set_active_tenant(
        &self,
        user_id: &UserId,
        tenant_id: &TenantId,
    ) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(user_id).ok_or(StoreError::ConditionFailed)?;
        record.active = Some(gatehouse_core::ActiveTenant {
            customer_id: tenant_id.clone(),
        });
        Ok(())
    }

    async fn replace_membership_roles(
        &self,
        user_id: &UserId,
        tenant_id: &TenantId,
        roles: Vec<RoleName>,
    ) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(user_id).ok_or(StoreError::ConditionFailed)?;
        let membership = record
            .membership_mut(tenant_id)
            .ok_or(StoreError::ConditionFailed)?;
        membership.roles = roles;
        Ok(())
    }

    async fn get_role_catalog(&self) -> Result<Option<RoleCatalog>, StoreError> {
        Ok(self.catalog.read().await.clone())
    }

    async fn put_role_catalog(&self, catalog: RoleCatalog) -> Result<(), StoreError> {
        *self.catalog.write().await = Some(catalog);
        Ok(())
    }
}
