//! Search service: validates a selector, loads its corpus, ranks rows.
//!
//! The two entry points mirror the two selector namespaces. Both return a
//! uniform [`SearchEnvelope`]; loader errors propagate unchanged.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::debug;

use designref_corpus::{CorpusCache, Row, SelectorKind, resolve};

use crate::error::Result;
use crate::ranker;

/// Uniform result of one search: the selector, the source, and the top-K
/// rows in rank order. `count` is the number of returned rows, not the raw
/// corpus size. Scores stay internal.
#[derive(Debug, Clone)]
pub struct SearchEnvelope {
    /// Which namespace the selector was resolved in.
    pub kind: SelectorKind,

    /// The selector name as given.
    pub selector: String,

    /// The query as given.
    pub query: String,

    /// Source file backing the corpus, relative to the data directory.
    pub file: String,

    /// Number of returned results (post-limit).
    pub count: usize,

    /// Top-K rows, best first.
    pub results: Vec<Row>,
}

// The wire shape matches the original tool: the first key is "domain" or
// "stack" depending on the namespace.
impl Serialize for SearchEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        match self.kind {
            SelectorKind::Domain => map.serialize_entry("domain", &self.selector)?,
            SelectorKind::Stack => map.serialize_entry("stack", &self.selector)?,
        }
        map.serialize_entry("query", &self.query)?;
        map.serialize_entry("file", &self.file)?;
        map.serialize_entry("count", &self.count)?;
        map.serialize_entry("results", &self.results)?;
        map.end()
    }
}

/// Orchestrates corpus loading and ranking for one invocation.
///
/// Owns the corpus cache for its lifetime, so every selector is read from
/// disk at most once per run.
pub struct SearchService {
    cache: CorpusCache,
}

impl SearchService {
    /// Create a service over the given cache.
    pub fn new(cache: CorpusCache) -> Self {
        Self { cache }
    }

    /// Search one domain corpus.
    pub fn search_domain(&mut self, query: &str, domain: &str, limit: usize) -> Result<SearchEnvelope> {
        self.search(SelectorKind::Domain, domain, query, limit)
    }

    /// Search one stack corpus.
    pub fn search_stack(&mut self, query: &str, stack: &str, limit: usize) -> Result<SearchEnvelope> {
        self.search(SelectorKind::Stack, stack, query, limit)
    }

    fn search(
        &mut self,
        kind: SelectorKind,
        selector: &str,
        query: &str,
        limit: usize,
    ) -> Result<SearchEnvelope> {
        let source = resolve(kind, selector)?;
        let rows = self.cache.load(kind, selector)?;

        let ranked = ranker::rank(query, rows, limit);
        let results: Vec<Row> = ranked.iter().map(|r| r.row.clone()).collect();

        debug!(
            %kind,
            selector,
            query,
            count = results.len(),
            "search complete"
        );

        Ok(SearchEnvelope {
            kind,
            selector: selector.to_string(),
            query: query.to_string(),
            file: source.file.to_string(),
            count: results.len(),
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn fixture_data_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("ux.csv"),
            "guideline,details\n\
             dashboard layout,arrange KPI cards in a responsive grid\n\
             form validation,validate inline on blur\n\
             dashboard filters,keep global filters in a sticky toolbar\n\
             empty states,explain the next action\n",
        )
        .unwrap();
        fs::create_dir_all(temp_dir.path().join("stacks")).unwrap();
        fs::write(
            temp_dir.path().join("stacks/nextjs.csv"),
            "guideline,details\nserver components,render static guidance on the server\n",
        )
        .unwrap();
        temp_dir
    }

    #[test]
    fn test_search_domain_envelope() {
        let data = fixture_data_dir();
        let mut service = SearchService::new(CorpusCache::new(data.path()));

        let envelope = service.search_domain("dashboard layout", "ux", 3).unwrap();

        assert_eq!(envelope.file, "ux.csv");
        assert!(envelope.count <= 3);
        assert_eq!(envelope.count, envelope.results.len());
        // Every result shares at least one token with the query.
        for row in &envelope.results {
            let text = row.searchable_text().to_lowercase();
            assert!(text.contains("dashboard") || text.contains("layout"));
        }
    }

    #[test]
    fn test_search_stack_never_falls_back_to_domains() {
        let data = fixture_data_dir();
        let mut service = SearchService::new(CorpusCache::new(data.path()));

        // "ux" is a domain; as a stack selector it must fail, not fall back.
        let err = service.search_stack("anything", "ux", 3).unwrap_err();
        assert!(matches!(
            err,
            crate::RetrievalError::Corpus(designref_corpus::CorpusError::UnknownIdentifier { .. })
        ));
    }

    #[test]
    fn test_envelope_json_shape() {
        let data = fixture_data_dir();
        let mut service = SearchService::new(CorpusCache::new(data.path()));

        let envelope = service.search_stack("server", "nextjs", 3).unwrap();
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["stack"], "nextjs");
        assert_eq!(json["file"], "stacks/nextjs.csv");
        assert_eq!(json["count"], 1);
        assert_eq!(json["results"][0]["guideline"], "server components");
        assert!(json.get("domain").is_none());
    }

    #[test]
    fn test_count_reports_post_limit_results() {
        let data = fixture_data_dir();
        let mut service = SearchService::new(CorpusCache::new(data.path()));

        let envelope = service.search_domain("dashboard", "ux", 1).unwrap();
        assert_eq!(envelope.count, 1);
    }
}
