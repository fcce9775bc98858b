//! Global role catalog: role name → allow/deny path patterns.
//!
//! The catalog is a single global record, replaced wholesale by the seeding
//! job and only read by the decision path. Path patterns identify an HTTP
//! method plus resource path and may contain one wildcard segment; at this
//! layer they are opaque strings.

use serde::{Deserialize, Serialize};

use crate::id::RoleName;

/// Allow/deny path patterns for one role.
///
/// Seeding from a route table always produces empty deny lists, but
/// consolidation supports nonempty deny lists set through other means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePaths {
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub deny: Vec<String>,
}

/// A named role and the path permissions it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub role: RoleName,
    pub paths: RolePaths,
}

/// The single global record holding every role definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCatalog {
    pub roles: Vec<RoleDefinition>,
}

/// One row of the static route table the catalog is seeded from:
/// a route pattern and the roles authorized to invoke it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGrant {
    pub route: String,
    pub roles: Vec<RoleName>,
}

impl RoleCatalog {
    pub fn find(&self, name: &RoleName) -> Option<&RoleDefinition> {
        self.roles.iter().find(|def| &def.role == name)
    }

    /// Invert a route table (route → authorized roles) into role definitions
    /// (role → allowed routes).
    ///
    /// Role order follows first appearance in the table; each role's allow
    /// list follows table order. Deny lists are always empty here.
    pub fn from_routes(routes: &[RouteGrant]) -> Self {
        let mut catalog = Self::default();
        for grant in routes {
            for role in &grant.roles {
                match catalog.roles.iter_mut().find(|def| &def.role == role) {
                    Some(def) => def.paths.allow.push(grant.route.clone()),
                    None => catalog.roles.push(RoleDefinition {
                        role: role.clone(),
                        paths: RolePaths {
                            allow: vec![grant.route.clone()],
                            deny: Vec::new(),
                        },
                    }),
                }
            }
        }
        catalog
    }
}
