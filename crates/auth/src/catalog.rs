//! Role catalog access: resolve role names to definitions, seed the catalog.

use gatehouse_core::{RoleCatalog, RoleDefinition, RoleName, RouteGrant};
use gatehouse_store::{AuthStore, StoreError};

/// Look up definitions for the given role names in the global catalog.
///
/// Names missing from the catalog are silently omitted (with a diagnostic);
/// an absent catalog record yields an empty result, which downstream
/// consolidation turns into a deny-by-default decision.
pub async fn resolve_roles(
    store: &dyn AuthStore,
    names: &[RoleName],
) -> Result<Vec<RoleDefinition>, StoreError> {
    let Some(catalog) = store.get_role_catalog().await? else {
        tracing::warn!("there is no authorizer role catalog configured");
        return Ok(Vec::new());
    };

    let mut definitions = Vec::new();
    for name in names {
        match catalog.find(name) {
            Some(definition) => definitions.push(definition.clone()),
            None => tracing::warn!(role = %name, "role is not present in the catalog"),
        }
    }

    Ok(definitions)
}

/// Invert a static route table into role definitions and replace the global
/// catalog wholesale.
pub async fn seed_catalog(store: &dyn AuthStore, routes: &[RouteGrant]) -> Result<(), StoreError> {
    let catalog = RoleCatalog::from_routes(routes);
    tracing::info!(roles = catalog.roles.len(), "seeding role catalog");
    store.put_role_catalog(catalog).await
}
