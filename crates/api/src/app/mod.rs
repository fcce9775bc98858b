//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: shared state handed to handlers
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and JSON mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use gatehouse_auth::{Authorizer, CredentialVerifier};
use gatehouse_store::{AuthStore, SecretStore};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(
    store: Arc<dyn AuthStore>,
    secrets: Arc<dyn SecretStore>,
    secret_id: impl Into<String>,
) -> Router {
    let verifier = CredentialVerifier::new(secrets, secret_id);
    let authorizer = Arc::new(Authorizer::new(store.clone(), verifier));
    let auth_state = middleware::AuthState { authorizer };

    let services = Arc::new(services::AppServices { store });

    // Protected routes: every request goes through a full decision.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
