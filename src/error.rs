//! Engine error types.

use thiserror::Error;

/// Errors surfaced by engine operations.
///
/// Read-side failures never appear here: a missing or malformed persisted
/// value degrades to the documented default state with a logged warning.
/// Only storage write failures propagate, and callers may treat them as a
/// degraded-durability signal rather than fatal: the value the call
/// returned is still the in-memory source of truth for the session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to persist {key}: {source}")]
    Store {
        key: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl EngineError {
    pub fn store(key: &'static str, source: anyhow::Error) -> Self {
        EngineError::Store { key, source }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
