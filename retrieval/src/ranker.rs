//! BM25 lexical ranking over corpus rows.
//!
//! Scores every row of one corpus against a free-text query using term
//! frequency, inverse document frequency across the row set, and row-length
//! normalization against the corpus mean. Rows with no overlapping terms are
//! excluded; ties are broken by original row position so results are
//! reproducible.

use std::collections::HashMap;

use designref_corpus::Row;

/// Term-frequency saturation constant.
const K1: f64 = 1.2;

/// Row-length normalization weight.
const B: f64 = 0.75;

/// One row with its relevance score and 1-based rank position.
#[derive(Debug, Clone)]
pub struct RankedRow<'a> {
    pub row: &'a Row,
    pub score: f64,
    pub rank: usize,
}

/// Split text into lowercase alphanumeric word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Rank `rows` against `query`, returning at most `limit` results.
///
/// Scores are non-negative; the output is sorted by non-increasing score,
/// stable with respect to source order. A `limit` of zero yields an empty
/// result without error.
pub fn rank<'a>(query: &str, rows: &'a [Row], limit: usize) -> Vec<RankedRow<'a>> {
    if limit == 0 || rows.is_empty() {
        return Vec::new();
    }

    let query_terms = tokenize(query);
    if query_terms.is_empty() {
        return Vec::new();
    }

    // Per-row token frequencies and corpus-wide document frequencies.
    let mut row_terms: Vec<HashMap<String, usize>> = Vec::with_capacity(rows.len());
    let mut row_lengths: Vec<usize> = Vec::with_capacity(rows.len());
    let mut doc_freq: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let tokens = tokenize(&row.searchable_text());
        row_lengths.push(tokens.len());

        let mut freq: HashMap<String, usize> = HashMap::new();
        for token in tokens {
            *freq.entry(token).or_insert(0) += 1;
        }
        for term in freq.keys() {
            *doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
        row_terms.push(freq);
    }

    let row_count = rows.len() as f64;
    let avg_length = row_lengths.iter().sum::<usize>() as f64 / row_count;

    let mut scored: Vec<RankedRow<'a>> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let mut score = 0.0;
        for term in &query_terms {
            let tf = *row_terms[i].get(term).unwrap_or(&0) as f64;
            if tf == 0.0 {
                continue;
            }
            let df = *doc_freq.get(term).unwrap_or(&0) as f64;
            // The +1 inside the log keeps idf non-negative even for terms
            // present in most rows of a tiny corpus.
            let idf = (1.0 + (row_count - df + 0.5) / (df + 0.5)).ln();
            let norm = 1.0 - B + B * (row_lengths[i] as f64 / avg_length);
            score += idf * (tf * (K1 + 1.0)) / (tf + K1 * norm);
        }
        if score > 0.0 {
            scored.push(RankedRow {
                row,
                score,
                rank: 0,
            });
        }
    }

    // Stable sort: equal scores keep source order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    for (i, result) in scored.iter_mut().enumerate() {
        result.rank = i + 1;
    }
    scored
}
