//! Error types for the search service.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur while searching a knowledge base.
///
/// Loader failures propagate unchanged; corpora are static per invocation,
/// so nothing here is retried.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Corpus resolution or loading failed.
    #[error(transparent)]
    Corpus(#[from] designref_corpus::CorpusError),
}
