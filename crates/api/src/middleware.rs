use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use gatehouse_auth::Authorizer;

use crate::context::Caller;

#[derive(Clone)]
pub struct AuthState {
    pub authorizer: Arc<Authorizer>,
}

/// Run a full authorization decision for the request.
///
/// Every failure mode (missing/bad token, unregistered caller, stale active
/// tenant, store outage) surfaces as a bare 401; detail is logged inside the
/// engine and never reaches the client.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let raw_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let decision = state
        .authorizer
        .authorize(raw_header)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(Caller::new(decision.context));

    Ok(next.run(req).await)
}
