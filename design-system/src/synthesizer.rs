//! Design-system synthesis across a fixed set of domains.
//!
//! Issues one domain search per entry in [`DESIGN_SYSTEM_DOMAINS`], all with
//! the same seed query (the seed is deliberately reused rather than
//! specialized per domain), and assembles the non-empty envelopes into an
//! ordered document. A stack guidance section is appended when the seed
//! query names a registered stack.

use tracing::warn;

use designref_retrieval::{SearchEnvelope, SearchService, tokenize};

use crate::error::{DesignSystemError, Result};

/// The fixed, ordered domain set a design system is assembled from.
pub const DESIGN_SYSTEM_DOMAINS: &[&str] =
    &["style", "color", "typography", "icons", "ux", "landing"];

/// Results kept per domain section.
const PER_DOMAIN_LIMIT: usize = 3;

/// One section of a synthesized design system.
#[derive(Debug, Clone)]
pub struct Section {
    /// Section heading (the domain name, or the stack name for the
    /// trailing stack-guidance section).
    pub title: String,

    /// The retrieval result backing the section.
    pub envelope: SearchEnvelope,
}

/// A synthesized design-system document, built fresh per invocation and
/// never mutated after rendering.
#[derive(Debug, Clone)]
pub struct DesignSystem {
    /// Project name carried into the rendered output.
    pub project: String,

    /// The seed query used for every section.
    pub query: String,

    /// Non-empty sections in fixed domain order.
    pub sections: Vec<Section>,
}

/// Synthesize a design system for `seed_query`.
///
/// Domains that return zero rows are skipped; per-domain errors are
/// swallowed and logged. Synthesis fails only when every lookup failed,
/// propagating the last underlying error.
pub fn synthesize(
    service: &mut SearchService,
    seed_query: &str,
    project_name: Option<&str>,
) -> Result<DesignSystem> {
    let project = project_name
        .map(str::to_string)
        .unwrap_or_else(|| seed_query.to_uppercase());

    let mut sections = Vec::new();
    let mut attempts = 0usize;
    let mut failures = 0usize;
    let mut last_error = None;

    for domain in DESIGN_SYSTEM_DOMAINS {
        attempts += 1;
        match service.search_domain(seed_query, domain, PER_DOMAIN_LIMIT) {
            Ok(envelope) if envelope.count > 0 => sections.push(Section {
                title: domain.to_string(),
                envelope,
            }),
            Ok(_) => warn!(domain, "no results for domain"),
            Err(err) => {
                warn!(domain, error = %err, "domain lookup failed");
                failures += 1;
                last_error = Some(err);
            }
        }
    }

    if let Some(stack) = detect_stack(seed_query) {
        attempts += 1;
        match service.search_stack(seed_query, stack, PER_DOMAIN_LIMIT) {
            Ok(envelope) if envelope.count > 0 => sections.push(Section {
                title: format!("{stack} stack"),
                envelope,
            }),
            Ok(_) => warn!(stack, "no results for stack"),
            Err(err) => {
                warn!(stack, error = %err, "stack lookup failed");
                failures += 1;
                last_error = Some(err);
            }
        }
    }

    // Total failure means no lookup succeeded at all; a run where some
    // domains merely returned nothing still yields a document.
    match last_error {
        Some(source) if failures == attempts => Err(DesignSystemError::AllDomainsFailed {
            query: seed_query.to_string(),
            source,
        }),
        _ => Ok(DesignSystem {
            project,
            query: seed_query.to_string(),
            sections,
        }),
    }
}

/// Map seed-query tokens to a registered stack, if any.
fn detect_stack(query: &str) -> Option<&'static str> {
    let tokens = tokenize(query);
    let has = |t: &str| tokens.iter().any(|token| token == t);

    if has("nextjs") || has("next") {
        Some("nextjs")
    } else if has("tailwind") {
        Some("html-tailwind")
    } else if has("react") {
        Some("react")
    } else {
        None
    }
}
