//! Static registry of searchable knowledge bases.
//!
//! Domains and stacks are disjoint namespaces: a stack name is never a
//! valid domain and vice versa, even when the same string appears in both
//! (the "react" domain and the "react" stack back different files).

use std::fmt;

use serde::Serialize;

use crate::error::{CorpusError, Result};

/// Which selector namespace an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    /// A category of design guidance (color, typography, ...).
    Domain,
    /// A technology target with its own guideline set.
    Stack,
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorKind::Domain => write!(f, "domain"),
            SelectorKind::Stack => write!(f, "stack"),
        }
    }
}

/// One registered knowledge base: a selector name, the tabular file backing
/// it, and the column treated as the human-readable label in output.
#[derive(Debug, Clone, Copy)]
pub struct CorpusSource {
    pub name: &'static str,
    pub file: &'static str,
    pub label_column: &'static str,
}

const DOMAINS: &[CorpusSource] = &[
    CorpusSource { name: "style", file: "style.csv", label_column: "name" },
    CorpusSource { name: "color", file: "color.csv", label_column: "palette" },
    CorpusSource { name: "chart", file: "chart.csv", label_column: "name" },
    CorpusSource { name: "landing", file: "landing.csv", label_column: "pattern" },
    CorpusSource { name: "product", file: "product.csv", label_column: "pattern" },
    CorpusSource { name: "ux", file: "ux.csv", label_column: "guideline" },
    CorpusSource { name: "typography", file: "typography.csv", label_column: "pairing" },
    CorpusSource { name: "icons", file: "icons.csv", label_column: "name" },
    CorpusSource { name: "react", file: "react.csv", label_column: "pattern" },
    CorpusSource { name: "web", file: "web.csv", label_column: "technique" },
];

const STACKS: &[CorpusSource] = &[
    CorpusSource { name: "html-tailwind", file: "stacks/html-tailwind.csv", label_column: "guideline" },
    CorpusSource { name: "react", file: "stacks/react.csv", label_column: "guideline" },
    CorpusSource { name: "nextjs", file: "stacks/nextjs.csv", label_column: "guideline" },
];

/// Resolve a selector name within one namespace.
///
/// Lookup never falls back to the other namespace.
pub fn resolve(kind: SelectorKind, name: &str) -> Result<&'static CorpusSource> {
    let table = match kind {
        SelectorKind::Domain => DOMAINS,
        SelectorKind::Stack => STACKS,
    };
    table
        .iter()
        .find(|source| source.name == name)
        .ok_or_else(|| CorpusError::unknown(kind, name, &names(kind)))
}

/// All registered selector names for a namespace, in registry order.
pub fn names(kind: SelectorKind) -> Vec<&'static str> {
    let table = match kind {
        SelectorKind::Domain => DOMAINS,
        SelectorKind::Stack => STACKS,
    };
    table.iter().map(|source| source.name).collect()
}
