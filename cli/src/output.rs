//! Console formatting for plain retrieval results and persistence
//! confirmations.

use designref_corpus::SelectorKind;
use designref_design_system::PersistReport;
use designref_design_system::render::truncate;
use designref_retrieval::SearchEnvelope;

/// Flatten an envelope into a labeled, truncated report.
pub fn format_envelope(envelope: &SearchEnvelope) -> String {
    let mut out = Vec::new();

    match envelope.kind {
        SelectorKind::Stack => {
            out.push("## Stack Guidelines".to_string());
            out.push(format!(
                "**Stack:** {} | **Query:** {}",
                envelope.selector, envelope.query
            ));
        }
        SelectorKind::Domain => {
            out.push("## Guideline Search Results".to_string());
            out.push(format!(
                "**Domain:** {} | **Query:** {}",
                envelope.selector, envelope.query
            ));
        }
    }
    out.push(format!(
        "**Source:** {} | **Found:** {} results\n",
        envelope.file, envelope.count
    ));

    for (i, row) in envelope.results.iter().enumerate() {
        out.push(format!("### Result {}", i + 1));
        for (key, value) in &row.columns {
            out.push(format!("- **{key}:** {}", truncate(value)));
        }
        out.push(String::new());
    }

    out.join("\n")
}

/// Confirmation block printed after a successful persist.
pub fn format_persist_confirmation(report: &PersistReport) -> String {
    let mut out = Vec::new();
    let rule = "=".repeat(60);

    out.push(rule.clone());
    if let Some(project_dir) = report.master.parent() {
        out.push(format!("Design system persisted to {}/", project_dir.display()));
    }
    out.push(format!("  master: {}", report.master.display()));
    if let Some(page) = &report.page {
        out.push(format!("  page override: {}", page.display()));
    }
    out.push(String::new());
    out.push(
        "Usage: when building a page, check its override under pages/ first. \
         A page override, when present, takes precedence over MASTER.md."
            .to_string(),
    );
    out.push(rule);

    out.join("\n")
}
