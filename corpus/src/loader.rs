//! Corpus loading and per-invocation caching.
//!
//! Knowledge bases are small CSV files, read once per selector and held in
//! an in-process cache for the lifetime of the `CorpusCache`. The cache is
//! an explicit object owned by one invocation, not a process-wide global.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{CorpusError, Result};
use crate::registry::{self, SelectorKind};

/// One retrievable unit of guidance: an ordered column → text mapping.
///
/// Identity is the source file plus the zero-based row position; rows are
/// immutable once loaded.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    /// File the row was read from, relative to the data directory.
    #[serde(skip)]
    pub file: &'static str,

    /// Zero-based position within the source, matching source order.
    #[serde(skip)]
    pub position: usize,

    /// Column name → text value, in header order.
    #[serde(flatten)]
    pub columns: IndexMap<String, String>,
}

impl Row {
    /// Concatenation of every text-bearing column, for the ranker.
    pub fn searchable_text(&self) -> String {
        let mut text = String::new();
        for value in self.columns.values() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(value);
        }
        text
    }
}

/// Loads knowledge bases on demand and caches them per selector.
pub struct CorpusCache {
    /// Directory holding the CSV knowledge bases.
    data_dir: PathBuf,

    /// Loaded corpora, keyed by namespace and selector name.
    cache: HashMap<(SelectorKind, String), Vec<Row>>,
}

impl CorpusCache {
    /// Create a cache reading from the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: HashMap::new(),
        }
    }

    /// Load the corpus for a selector, reading the source at most once.
    ///
    /// Fails with `UnknownIdentifier` when the name is not registered for
    /// `kind`, and with `Unavailable` when the backing file cannot be read,
    /// is empty, or lacks the registered label column.
    pub fn load(&mut self, kind: SelectorKind, name: &str) -> Result<&[Row]> {
        let source = registry::resolve(kind, name)?;

        match self.cache.entry((kind, name.to_string())) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = self.data_dir.join(source.file);
                let rows = read_source(&path, source.file, source.label_column)?;
                debug!(file = source.file, rows = rows.len(), "loaded corpus");
                Ok(entry.insert(rows))
            }
        }
    }
}

/// Read and validate one CSV knowledge base.
fn read_source(path: &Path, file: &'static str, label_column: &str) -> Result<Vec<Row>> {
    let content = fs::read_to_string(path).map_err(|e| CorpusError::Unavailable {
        file: file.to_string(),
        reason: format!("{}: {e}", path.display()),
    })?;

    let mut records = parse_csv(&content).into_iter();

    let header = records.next().ok_or_else(|| CorpusError::Unavailable {
        file: file.to_string(),
        reason: "missing header row".to_string(),
    })?;

    if !header.iter().any(|column| column == label_column) {
        return Err(CorpusError::Unavailable {
            file: file.to_string(),
            reason: format!("missing expected column '{label_column}'"),
        });
    }

    let mut rows = Vec::new();
    for (position, record) in records.enumerate() {
        if record.len() != header.len() {
            warn!(
                file,
                position,
                expected = header.len(),
                got = record.len(),
                "row width differs from header; padding"
            );
        }
        let mut columns = IndexMap::new();
        for (i, column) in header.iter().enumerate() {
            let value = record.get(i).cloned().unwrap_or_default();
            columns.insert(column.clone(), value);
        }
        rows.push(Row {
            file,
            position,
            columns,
        });
    }

    if rows.is_empty() {
        return Err(CorpusError::Unavailable {
            file: file.to_string(),
            reason: "no data rows".to_string(),
        });
    }

    Ok(rows)
}

/// Minimal RFC-4180 CSV parser: quoted fields, doubled quotes, CRLF, and
/// newlines inside quotes. Small enough that a dependency is not warranted.
fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => {
                record.push(std::mem::take(&mut field));
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    // Final record without a trailing newline.
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    // A lone newline at the end of file is not an empty record.
    records.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_data(dir: &Path, file: &str, content: &str) {
        let path = dir.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parse_csv_quoted_fields() {
        let parsed = parse_csv("a,b\n\"x, y\",\"he said \"\"hi\"\"\"\n");
        assert_eq!(
            parsed,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["x, y".to_string(), "he said \"hi\"".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_csv_crlf_and_embedded_newline() {
        let parsed = parse_csv("a,b\r\n\"line1\nline2\",v\r\n");
        assert_eq!(parsed[1][0], "line1\nline2");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_load_preserves_row_order() {
        let temp_dir = TempDir::new().unwrap();
        write_data(
            temp_dir.path(),
            "ux.csv",
            "guideline,details\nfirst,one\nsecond,two\nthird,three\n",
        );

        let mut cache = CorpusCache::new(temp_dir.path());
        let rows = cache.load(SelectorKind::Domain, "ux").unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].columns["guideline"], "first");
        assert_eq!(rows[2].columns["guideline"], "third");
        assert_eq!(rows[2].position, 2);
    }

    #[test]
    fn test_load_caches_source_reads() {
        let temp_dir = TempDir::new().unwrap();
        write_data(temp_dir.path(), "ux.csv", "guideline\nonly row\n");

        let mut cache = CorpusCache::new(temp_dir.path());
        cache.load(SelectorKind::Domain, "ux").unwrap();

        // Deleting the backing file must not affect a cached corpus.
        fs::remove_file(temp_dir.path().join("ux.csv")).unwrap();
        let rows = cache.load(SelectorKind::Domain, "ux").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_load_unknown_identifier() {
        let mut cache = CorpusCache::new("data");
        let err = cache.load(SelectorKind::Domain, "no-such-domain").unwrap_err();
        assert!(matches!(err, CorpusError::UnknownIdentifier { .. }));
    }

    #[test]
    fn test_load_missing_label_column() {
        let temp_dir = TempDir::new().unwrap();
        write_data(temp_dir.path(), "ux.csv", "wrong,columns\na,b\n");

        let mut cache = CorpusCache::new(temp_dir.path());
        let err = cache.load(SelectorKind::Domain, "ux").unwrap_err();
        assert!(matches!(err, CorpusError::Unavailable { .. }));
    }

    #[test]
    fn test_load_empty_corpus() {
        let temp_dir = TempDir::new().unwrap();
        write_data(temp_dir.path(), "ux.csv", "guideline,details\n");

        let mut cache = CorpusCache::new(temp_dir.path());
        let err = cache.load(SelectorKind::Domain, "ux").unwrap_err();
        assert!(matches!(err, CorpusError::Unavailable { .. }));
    }

    #[test]
    fn test_searchable_text_concatenates_columns() {
        let temp_dir = TempDir::new().unwrap();
        write_data(temp_dir.path(), "ux.csv", "guideline,details\ncontrast,use 4.5:1 ratios\n");

        let mut cache = CorpusCache::new(temp_dir.path());
        let rows = cache.load(SelectorKind::Domain, "ux").unwrap();
        assert_eq!(rows[0].searchable_text(), "contrast use 4.5:1 ratios");
    }
}
