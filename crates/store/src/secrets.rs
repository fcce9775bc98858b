//! Secret retrieval boundary (token signing key lives behind this).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::SecretError;

/// Read-only access to named secrets.
///
/// Fetches are idempotent and side-effect free, so a caller caching the
/// result may safely duplicate a fetch under a first-use race.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up a secret by id. Absence is `Ok(None)`, not an error.
    async fn get_secret(&self, secret_id: &str) -> Result<Option<String>, SecretError>;
}

/// Fixed secrets held in process memory (tests, local runs).
#[derive(Default)]
pub struct InMemorySecrets {
    secrets: HashMap<String, String>,
}

impl InMemorySecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(id.into(), value.into());
        self
    }
}

#[async_trait]
impl SecretStore for InMemorySecrets {
    async fn get_secret(&self, secret_id: &str) -> Result<Option<String>, SecretError> {
        Ok(self.secrets.get(secret_id).cloned())
    }
}
