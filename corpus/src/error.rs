//! Error types for corpus loading.

use thiserror::Error;

use crate::registry::SelectorKind;

/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors that can occur while resolving and loading a knowledge base.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The selector name is not registered in its namespace.
    #[error("unknown {kind}: '{name}' (available: {available})")]
    UnknownIdentifier {
        kind: SelectorKind,
        name: String,
        available: String,
    },

    /// The backing source exists in the registry but cannot be used.
    #[error("corpus '{file}' unavailable: {reason}")]
    Unavailable { file: String, reason: String },
}

impl CorpusError {
    /// Build an `UnknownIdentifier` error listing the valid names for `kind`.
    pub(crate) fn unknown(kind: SelectorKind, name: &str, names: &[&str]) -> Self {
        Self::UnknownIdentifier {
            kind,
            name: name.to_string(),
            available: names.join(", "),
        }
    }
}
