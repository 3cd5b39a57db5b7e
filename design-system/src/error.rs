//! Error types for design-system synthesis and persistence.

use std::path::PathBuf;

use thiserror::Error;

use designref_retrieval::RetrievalError;

/// Result type alias for design-system operations.
pub type Result<T> = std::result::Result<T, DesignSystemError>;

/// Errors that can occur while synthesizing or persisting a design system.
#[derive(Error, Debug)]
pub enum DesignSystemError {
    /// Every constituent domain lookup failed. Partial failures are
    /// tolerated and logged; only total failure aborts synthesis.
    #[error("no design-system domain could be searched for '{query}': {source}")]
    AllDomainsFailed {
        query: String,
        source: RetrievalError,
    },

    /// Directory creation or file write failed. Master and page writes are
    /// independent; nothing is rolled back.
    #[error("failed to persist {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}
