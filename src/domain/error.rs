//! Errors raised while building or processing a spec
//!
//! Every error is fatal. Processing either produces a complete spec or stops
//! at the first problem, naming the offending position, alias or ID.

use thiserror::Error;

use super::id::IdError;
use crate::rules::{SgfError, TreepathError};

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    DuplicateId(#[from] IdError),

    #[error("No SGF found for alias '{0}'")]
    Lookup(String),

    #[error("Invalid position '{id}': {reason}")]
    Validation { id: String, reason: String },

    #[error("Failed to parse SGF for alias '{alias}': {source}")]
    Sgf {
        alias: String,
        #[source]
        source: SgfError,
    },

    #[error("Bad treepath in position '{id}': {source}")]
    Treepath {
        id: String,
        #[source]
        source: TreepathError,
    },

    #[error("Invalid spec JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpecError {
    pub(crate) fn validation(id: &str, reason: impl Into<String>) -> Self {
        SpecError::Validation {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn treepath(id: &str, source: TreepathError) -> Self {
        SpecError::Treepath {
            id: id.to_string(),
            source,
        }
    }
}
