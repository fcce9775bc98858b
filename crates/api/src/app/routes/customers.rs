//! Tenant-management endpoints: join, switch active, replace roles.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
    Json, Router,
};

use gatehouse_auth::{add_tenant, switch_active_tenant, update_tenant_roles};
use gatehouse_core::TenantId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::Caller;

pub fn router() -> Router {
    Router::new()
        .route("/", post(add_customer))
        .route("/active", put(switch_active_customer))
        .route("/:customer_id/roles", put(update_customer_roles))
}

/// `POST /customers`: join a tenant (idempotent). 204 on success or no-op.
pub async fn add_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<dto::AddTenantRequest>,
) -> axum::response::Response {
    let outcome = add_tenant(
        services.store.as_ref(),
        caller.user_id(),
        body.id,
        body.roles,
        body.make_active,
    )
    .await;

    match outcome {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::membership_error_to_response(err),
    }
}

/// `PUT /customers/active`: select a different active tenant.
///
/// The current active tenant comes from the caller's decision context, so a
/// request naming it is a trivial 204 without touching the store.
pub async fn switch_active_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<dto::SwitchActiveTenantRequest>,
) -> axum::response::Response {
    let outcome = switch_active_tenant(
        services.store.as_ref(),
        caller.user_id(),
        &body.customer_id,
        Some(caller.customer_id()),
    )
    .await;

    match outcome {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::membership_error_to_response(err),
    }
}

/// `PUT /customers/{customer_id}/roles`: replace a membership's roles.
pub async fn update_customer_roles(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<Caller>,
    Path(customer_id): Path<String>,
    Json(body): Json<dto::UpdateTenantRolesRequest>,
) -> axum::response::Response {
    let outcome = update_tenant_roles(
        services.store.as_ref(),
        caller.user_id(),
        &TenantId::new(customer_id),
        body.roles,
    )
    .await;

    match outcome {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::membership_error_to_response(err),
    }
}
