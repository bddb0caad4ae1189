use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single failure kind surfaced by a configuration store. The message is
/// shown to the user verbatim, so stores should keep it human-readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct PersistenceError {
    pub message: String,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
