//! # Corpus loading for designref
//!
//! This crate owns the static registry of searchable knowledge bases and
//! the loader that reads them into row records:
//!
//! - **Registry**: domain and stack selectors, two disjoint namespaces,
//!   each mapping 1:1 to a CSV source file.
//! - **Loader**: reads a source into ordered [`Row`] records, validating
//!   the expected label column, and caches per selector so repeated
//!   lookups within one run avoid re-reading the file.

pub mod error;
pub mod loader;
pub mod registry;

pub use error::{CorpusError, Result};
pub use loader::{CorpusCache, Row};
pub use registry::{CorpusSource, SelectorKind, names, resolve};
