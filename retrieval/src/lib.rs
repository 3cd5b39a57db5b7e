//! # Lexical retrieval for designref
//!
//! BM25-family ranking over small tabular knowledge bases, plus the search
//! service that ties selector resolution, corpus loading, and ranking into
//! a uniform result envelope.
//!
//! ```rust,ignore
//! use designref_corpus::CorpusCache;
//! use designref_retrieval::SearchService;
//!
//! let mut service = SearchService::new(CorpusCache::new("data"));
//! let envelope = service.search_domain("dashboard layout", "ux", 3)?;
//! ```

pub mod error;
pub mod ranker;
pub mod service;

pub use error::{Result, RetrievalError};
pub use ranker::{RankedRow, rank, tokenize};
pub use service::{SearchEnvelope, SearchService};

// Re-export from dependencies for convenience
pub use designref_corpus::{CorpusCache, Row, SelectorKind};
