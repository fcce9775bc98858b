//! Shared state handed to route handlers.

use std::sync::Arc;

use gatehouse_store::AuthStore;

pub struct AppServices {
    pub store: Arc<dyn AuthStore>,
}
