//! `gatehouse-store` — storage boundary for user records, the role catalog,
//! and signing secrets.
//!
//! This crate defines infrastructure-facing abstractions without making any
//! storage assumptions. The in-memory implementations back tests and the dev
//! server; a real deployment supplies its own `AuthStore`/`SecretStore`.

pub mod auth_store;
pub mod error;
pub mod memory;
pub mod secrets;

pub use auth_store::AuthStore;
pub use error::{SecretError, StoreError};
pub use memory::InMemoryStore;
pub use secrets::{InMemorySecrets, SecretStore};
