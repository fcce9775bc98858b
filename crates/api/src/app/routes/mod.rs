use axum::{routing::get, Router};

pub mod customers;
pub mod system;

/// All protected routes (auth middleware is layered on by `build_app`).
pub fn router() -> Router {
    Router::new()
        .nest("/customers", customers::router())
        .route("/whoami", get(system::whoami))
}
