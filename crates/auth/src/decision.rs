//! The decision engine: credential → membership → roles → policy → document.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use gatehouse_core::{TenantId, TenantMembership, UserId, UserRecord};
use gatehouse_store::{AuthStore, StoreError};

use crate::catalog::resolve_roles;
use crate::policy::{consolidate, ConsolidatedPolicy};
use crate::verifier::{CredentialError, CredentialVerifier};

/// The single outcome callers see for any authorization failure.
///
/// Credential detail, store failures, and invariant violations are logged
/// server-side and collapsed to this opaque value; the engine never fails
/// open and never leaks internal error detail.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unauthorized")]
pub struct Unauthorized;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// One statement of the policy document: an effect over a set of path
/// patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyStatement {
    pub effect: Effect,
    pub resources: Vec<String>,
}

/// Allow/deny statement pair; each present only when its set is nonempty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_statement: Option<PolicyStatement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny_statement: Option<PolicyStatement>,
}

/// Request context handed to downstream handlers.
///
/// `roles` is the active tenant's role list JSON-encoded as a string, since
/// the context bundle is a flat string map on the wire. Display fields are
/// omitted entirely when absent, never emitted as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub user_id: UserId,
    pub customer_id: TenantId,
    pub email: String,
    pub roles: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Ephemeral per-request authorization result. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDocument {
    pub principal_id: UserId,
    pub policy_document: PolicyDocument,
    pub context: RequestContext,
}

/// Internal failure taxonomy; collapsed to [`Unauthorized`] at the boundary.
#[derive(Debug, Error)]
enum AuthorizeError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no user record matches the verified credential")]
    UnknownUser,

    #[error("user has no active tenant selected")]
    NoActiveTenant,

    #[error("active tenant pointer does not match any membership")]
    StaleActiveTenant,

    #[error("failed to encode request context roles: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Per-request entry point: orchestrates verification, membership lookup,
/// role resolution, and policy consolidation.
pub struct Authorizer {
    store: Arc<dyn AuthStore>,
    verifier: CredentialVerifier,
}

impl Authorizer {
    pub fn new(store: Arc<dyn AuthStore>, verifier: CredentialVerifier) -> Self {
        Self { store, verifier }
    }

    /// Produce a decision document for one inbound request.
    ///
    /// Any failure along the way (bad credential, unregistered caller,
    /// stale active pointer, store outage) aborts with [`Unauthorized`];
    /// no partial decision is ever returned.
    pub async fn authorize(
        &self,
        raw_header: Option<&str>,
    ) -> Result<DecisionDocument, Unauthorized> {
        match self.try_authorize(raw_header).await {
            Ok(document) => Ok(document),
            Err(err) => {
                tracing::error!(error = %err, "authorization failed");
                Err(Unauthorized)
            }
        }
    }

    async fn try_authorize(
        &self,
        raw_header: Option<&str>,
    ) -> Result<DecisionDocument, AuthorizeError> {
        let user_id = self.verifier.verify(raw_header).await?;

        let user = self
            .store
            .get_user(&user_id)
            .await?
            .ok_or(AuthorizeError::UnknownUser)?;

        // Never guess an active tenant: an unset or dangling pointer denies.
        if user.active.is_none() {
            return Err(AuthorizeError::NoActiveTenant);
        }
        let membership = user
            .active_membership()
            .ok_or(AuthorizeError::StaleActiveTenant)?;

        let definitions = resolve_roles(self.store.as_ref(), &membership.roles).await?;
        let merged = consolidate(&definitions);

        build_document(&user, membership, merged)
    }
}

fn build_document(
    user: &UserRecord,
    membership: &TenantMembership,
    merged: ConsolidatedPolicy,
) -> Result<DecisionDocument, AuthorizeError> {
    let mut policy_document = PolicyDocument::default();
    if !merged.allow.is_empty() {
        policy_document.allow_statement = Some(PolicyStatement {
            effect: Effect::Allow,
            resources: merged.allow,
        });
    }
    if !merged.deny.is_empty() {
        policy_document.deny_statement = Some(PolicyStatement {
            effect: Effect::Deny,
            resources: merged.deny,
        });
    }

    let details = user.details.as_ref();
    let context = RequestContext {
        user_id: user.id.clone(),
        customer_id: membership.id.clone(),
        email: user.email.clone(),
        roles: serde_json::to_string(&membership.roles)?,
        first_name: details.and_then(|d| d.first_name.clone()),
        last_name: details.and_then(|d| d.last_name.clone()),
        suffix: details.and_then(|d| d.suffix.clone()),
    };

    Ok(DecisionDocument {
        principal_id: user.id.clone(),
        policy_document,
        context,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde_json::json;

    use gatehouse_core::{
        ActiveTenant, RoleCatalog, RoleDefinition, RoleName, RolePaths, UserDetails,
    };
    use gatehouse_store::{InMemorySecrets, InMemoryStore};

    use super::*;

    const SECRET_ID: &str = "jwt-signature";
    const SECRET: &str = "test-secret";

    fn mint(sub: &str) -> String {
        let claims = json!({
            "exp": (Utc::now() + Duration::minutes(10)).timestamp(),
            "data": { "sub": sub },
        });
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        format!("Bearer {token}")
    }

    fn authorizer(store: Arc<InMemoryStore>) -> Authorizer {
        let secrets = Arc::new(InMemorySecrets::new().with_secret(SECRET_ID, SECRET));
        Authorizer::new(store, CredentialVerifier::new(secrets, SECRET_ID))
    }

    fn membership(id: &str, roles: &[&str]) -> TenantMembership {
        TenantMembership {
            id: TenantId::new(id),
            roles: roles.iter().map(|r| RoleName::new(*r)).collect(),
        }
    }

    fn definition(role: &str, allow: &[&str], deny: &[&str]) -> RoleDefinition {
        RoleDefinition {
            role: RoleName::new(role),
            paths: RolePaths {
                allow: allow.iter().map(|p| p.to_string()).collect(),
                deny: deny.iter().map(|p| p.to_string()).collect(),
            },
        }
    }

    async fn seed_member_user(store: &InMemoryStore) {
        let mut record = UserRecord::new(UserId::new("u1"), "alice@example.com");
        record.customers = vec![membership("t1", &["member"])];
        record.active = Some(ActiveTenant {
            customer_id: TenantId::new("t1"),
        });
        store.put_user(record).await.unwrap();

        store
            .put_role_catalog(RoleCatalog {
                roles: vec![definition("member", &["GET /parks"], &[])],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn member_gets_allow_statement_and_no_deny() {
        let store = Arc::new(InMemoryStore::new());
        seed_member_user(&store).await;

        let document = authorizer(store).authorize(Some(&mint("u1"))).await.unwrap();

        assert_eq!(document.principal_id, UserId::new("u1"));
        let allow = document.policy_document.allow_statement.unwrap();
        assert_eq!(allow.effect, Effect::Allow);
        assert_eq!(allow.resources, vec!["GET /parks"]);
        assert!(document.policy_document.deny_statement.is_none());

        assert_eq!(document.context.customer_id, TenantId::new("t1"));
        assert_eq!(document.context.email, "alice@example.com");
        assert_eq!(document.context.roles, r#"["member"]"#);
        assert!(document.context.first_name.is_none());
    }

    #[tokio::test]
    async fn identical_pattern_held_in_both_roles_is_allowed() {
        let store = Arc::new(InMemoryStore::new());
        let mut record = UserRecord::new(UserId::new("u1"), "alice@example.com");
        record.customers = vec![membership("t1", &["admin", "visitor"])];
        record.active = Some(ActiveTenant {
            customer_id: TenantId::new("t1"),
        });
        store.put_user(record).await.unwrap();
        store
            .put_role_catalog(RoleCatalog {
                roles: vec![
                    definition("admin", &["POST /parks/*/statuses"], &[]),
                    definition("visitor", &[], &["POST /parks/*/statuses"]),
                ],
            })
            .await
            .unwrap();

        let document = authorizer(store).authorize(Some(&mint("u1"))).await.unwrap();

        let allow = document.policy_document.allow_statement.unwrap();
        assert_eq!(allow.resources, vec!["POST /parks/*/statuses"]);
        assert!(document.policy_document.deny_statement.is_none());
    }

    #[tokio::test]
    async fn missing_credential_denies() {
        let store = Arc::new(InMemoryStore::new());
        seed_member_user(&store).await;

        assert_eq!(authorizer(store).authorize(None).await, Err(Unauthorized));
    }

    #[tokio::test]
    async fn invalid_signature_denies() {
        let store = Arc::new(InMemoryStore::new());
        seed_member_user(&store).await;

        let claims = json!({
            "exp": (Utc::now() + Duration::minutes(10)).timestamp(),
            "data": { "sub": "u1" },
        });
        let forged = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"wrong-secret"),
        )
        .unwrap();

        let outcome = authorizer(store)
            .authorize(Some(&format!("Bearer {forged}")))
            .await;
        assert_eq!(outcome, Err(Unauthorized));
    }

    #[tokio::test]
    async fn verified_credential_without_record_denies() {
        let store = Arc::new(InMemoryStore::new());
        seed_member_user(&store).await;

        let outcome = authorizer(store).authorize(Some(&mint("stranger"))).await;
        assert_eq!(outcome, Err(Unauthorized));
    }

    #[tokio::test]
    async fn unset_active_pointer_denies() {
        let store = Arc::new(InMemoryStore::new());
        let mut record = UserRecord::new(UserId::new("u1"), "alice@example.com");
        record.customers = vec![membership("t1", &["member"])];
        store.put_user(record).await.unwrap();

        let outcome = authorizer(store).authorize(Some(&mint("u1"))).await;
        assert_eq!(outcome, Err(Unauthorized));
    }

    #[tokio::test]
    async fn dangling_active_pointer_denies() {
        let store = Arc::new(InMemoryStore::new());
        let mut record = UserRecord::new(UserId::new("u1"), "alice@example.com");
        record.customers = vec![membership("t1", &["member"])];
        record.active = Some(ActiveTenant {
            customer_id: TenantId::new("gone"),
        });
        store.put_user(record).await.unwrap();

        let outcome = authorizer(store).authorize(Some(&mint("u1"))).await;
        assert_eq!(outcome, Err(Unauthorized));
    }

    #[tokio::test]
    async fn absent_catalog_yields_decision_with_no_statements() {
        let store = Arc::new(InMemoryStore::new());
        let mut record = UserRecord::new(UserId::new("u1"), "alice@example.com");
        record.customers = vec![membership("t1", &["member"])];
        record.active = Some(ActiveTenant {
            customer_id: TenantId::new("t1"),
        });
        store.put_user(record).await.unwrap();

        let document = authorizer(store).authorize(Some(&mint("u1"))).await.unwrap();

        assert!(document.policy_document.allow_statement.is_none());
        assert!(document.policy_document.deny_statement.is_none());
    }

    #[tokio::test]
    async fn display_fields_flow_into_context_only_when_present() {
        let store = Arc::new(InMemoryStore::new());
        let mut record = UserRecord::new(UserId::new("u1"), "alice@example.com");
        record.details = Some(UserDetails {
            first_name: Some("Alice".to_string()),
            last_name: None,
            suffix: Some("Jr".to_string()),
        });
        record.customers = vec![membership("t1", &["member"])];
        record.active = Some(ActiveTenant {
            customer_id: TenantId::new("t1"),
        });
        store.put_user(record).await.unwrap();
        store
            .put_role_catalog(RoleCatalog {
                roles: vec![definition("member", &["GET /parks"], &[])],
            })
            .await
            .unwrap();

        let document = authorizer(store).authorize(Some(&mint("u1"))).await.unwrap();

        assert_eq!(document.context.first_name.as_deref(), Some("Alice"));
        assert_eq!(document.context.suffix.as_deref(), Some("Jr"));

        let wire = serde_json::to_value(&document.context).unwrap();
        assert!(wire.get("lastName").is_none());
    }
}
