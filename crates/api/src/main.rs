use std::sync::Arc;

use gatehouse_core::{RoleName, RouteGrant};
use gatehouse_store::{InMemorySecrets, InMemoryStore};

const SIGNING_SECRET_ID: &str = "jwt-signature";

#[tokio::main]
async fn main() {
    gatehouse_observability::init();

    let signature = std::env::var("JWT_SIGNATURE").unwrap_or_else(|_| {
        tracing::warn!("JWT_SIGNATURE not set; using insecure dev default");
        "dev-secret".to_string()
    });

    // Dev wiring: in-memory store seeded with the static route catalog. A
    // real deployment supplies its own AuthStore/SecretStore implementations.
    let store = Arc::new(InMemoryStore::new());
    gatehouse_auth::seed_catalog(store.as_ref(), &default_route_grants())
        .await
        .expect("failed to seed role catalog");

    let secrets = Arc::new(InMemorySecrets::new().with_secret(SIGNING_SECRET_ID, signature));
    let app = gatehouse_api::app::build_app(store, secrets, SIGNING_SECRET_ID);

    let addr = std::env::var("GATEHOUSE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

fn default_route_grants() -> Vec<RouteGrant> {
    let grant = |route: &str, roles: &[&str]| RouteGrant {
        route: route.to_string(),
        roles: roles.iter().map(|r| RoleName::new(*r)).collect(),
    };

    vec![
        grant("GET /parks", &["admin", "visitor", "member"]),
        grant("POST /parks", &["admin", "member"]),
        grant("POST /parks/*/statuses", &["admin"]),
        grant("POST /parks/*/webhooks", &["visitor"]),
        grant("PUT /settings", &["admin", "member", "visitor"]),
        grant("GET /settings", &["admin", "member", "visitor"]),
        grant("POST /customers", &["admin", "member", "visitor"]),
        grant("GET /customers", &["admin", "member", "visitor"]),
        grant("PUT /customers/*/roles", &["admin", "member", "visitor"]),
    ]
}
