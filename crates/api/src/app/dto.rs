//! Request DTOs for the tenant-management endpoints.

use serde::Deserialize;

use gatehouse_core::{RoleName, TenantId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTenantRequest {
    pub id: TenantId,
    #[serde(default)]
    pub roles: Vec<RoleName>,
    #[serde(default)]
    pub make_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchActiveTenantRequest {
    pub customer_id: TenantId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTenantRolesRequest {
    pub roles: Vec<RoleName>,
}
