//! Storage error model.

use thiserror::Error;

/// Failure of a record-store operation.
///
/// Condition failures on guarded mutations are "precondition not met", never
/// retried automatically by this core; callers surface a generic failure and
/// let the client retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or the operation did not complete.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A guarded mutation's precondition did not hold at write time.
    #[error("store precondition failed")]
    ConditionFailed,

    /// A stored record could not be decoded into its domain shape.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}

/// Failure of a secret-store read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    #[error("secret store unavailable: {0}")]
    Unavailable(String),
}
