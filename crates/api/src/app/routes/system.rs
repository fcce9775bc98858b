use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::Caller;

/// Liveness probe, deliberately outside the auth layer.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Echo the authorized caller's request context (debugging aid).
pub async fn whoami(Extension(caller): Extension<Caller>) -> impl IntoResponse {
    Json(caller.context().clone())
}
