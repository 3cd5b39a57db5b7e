//! Rendering of synthesized design systems.
//!
//! Two presentation modes: `ascii` for direct terminal/agent consumption
//! and `markdown` for persisted documentation. Field values are truncated
//! to keep either rendering token-friendly.

use crate::synthesizer::{DesignSystem, Section};

/// Maximum characters kept per field value in rendered output.
pub const MAX_FIELD_CHARS: usize = 300;

/// Presentation mode for a rendered design system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// Plain structured text with box-drawing section markers.
    Ascii,
    /// Headings and lists, intended for the persisted store.
    Markdown,
}

/// Render a design system in the requested format.
pub fn render(system: &DesignSystem, format: RenderFormat) -> String {
    match format {
        RenderFormat::Ascii => render_ascii(system),
        RenderFormat::Markdown => render_markdown(system),
    }
}

/// Truncate a value for display, appending an ellipsis marker when cut.
/// The marker counts against the limit, so output never exceeds
/// `MAX_FIELD_CHARS` characters.
pub fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_FIELD_CHARS {
        value.to_string()
    } else {
        let cut: String = value.chars().take(MAX_FIELD_CHARS - 3).collect();
        format!("{cut}...")
    }
}

fn render_ascii(system: &DesignSystem) -> String {
    let mut out = String::new();
    let title = format!("DESIGN SYSTEM: {}", system.project);

    out.push_str(&format!("╔{}╗\n", "═".repeat(title.len() + 4)));
    out.push_str(&format!("║  {title}  ║\n"));
    out.push_str(&format!("╚{}╝\n", "═".repeat(title.len() + 4)));
    out.push_str(&format!("Query: {}\n", system.query));

    if system.sections.is_empty() {
        out.push_str("\n(no matching guidance found)\n");
        return out;
    }

    for section in &system.sections {
        out.push('\n');
        let heading = section.title.to_uppercase();
        out.push_str(&format!("── {heading} {}\n", "─".repeat(40usize.saturating_sub(heading.len()))));
        render_rows_ascii(&mut out, section);
    }
    out
}

fn render_rows_ascii(out: &mut String, section: &Section) {
    for (i, row) in section.envelope.results.iter().enumerate() {
        out.push_str(&format!("[{}]", i + 1));
        let mut first = true;
        for (key, value) in &row.columns {
            if first {
                out.push_str(&format!(" {}\n", truncate(value)));
                first = false;
            } else {
                out.push_str(&format!("    {key}: {}\n", truncate(value)));
            }
        }
    }
}

fn render_markdown(system: &DesignSystem) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Design System: {}\n\n", system.project));
    out.push_str(&format!("> Generated from query: \"{}\"\n", system.query));

    if system.sections.is_empty() {
        out.push_str("\n_No matching guidance found._\n");
        return out;
    }

    for section in &system.sections {
        out.push_str(&format!("\n## {}\n\n", heading_case(&section.title)));
        for (i, row) in section.envelope.results.iter().enumerate() {
            out.push_str(&format!("### {}.", i + 1));
            let mut first = true;
            for (key, value) in &row.columns {
                if first {
                    out.push_str(&format!(" {}\n", truncate(value)));
                    first = false;
                } else {
                    out.push_str(&format!("- **{key}:** {}\n", truncate(value)));
                }
            }
            out.push('\n');
        }
    }
    out
}

// Simple title case over whitespace; section titles are short slugs.
fn heading_case(title: &str) -> String {
    title
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesizer::synthesize;
    use designref_corpus::CorpusCache;
    use designref_retrieval::SearchService;
    use std::fs;
    use tempfile::TempDir;

    fn fixture_system() -> DesignSystem {
        let temp_dir = TempDir::new().unwrap();
        for (file, content) in [
            ("style.csv", "name,keywords\nminimal,landing clean\n"),
            ("color.csv", "palette,notes\nblue,landing hero\n"),
            ("typography.csv", "pairing,notes\ninter,ui text\n"),
            ("icons.csv", "name,notes\nlucide,outline\n"),
            ("ux.csv", "guideline,details\nhierarchy,landing focus\n"),
            ("landing.csv", "pattern,notes\nhero,landing page\n"),
        ] {
            fs::write(temp_dir.path().join(file), content).unwrap();
        }
        let mut service = SearchService::new(CorpusCache::new(temp_dir.path()));
        synthesize(&mut service, "landing page", Some("Acme")).unwrap()
    }

    #[test]
    fn test_truncate_cuts_long_values() {
        let long = "x".repeat(400);
        let cut = truncate(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), MAX_FIELD_CHARS);
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn test_truncate_never_exceeds_field_limit() {
        let exact = "y".repeat(MAX_FIELD_CHARS);
        assert_eq!(truncate(&exact), exact);
        let over = "y".repeat(MAX_FIELD_CHARS + 1);
        assert_eq!(truncate(&over).chars().count(), MAX_FIELD_CHARS);
    }

    #[test]
    fn test_ascii_render_has_banner_and_sections() {
        let system = fixture_system();
        let rendered = render(&system, RenderFormat::Ascii);

        assert!(rendered.contains("DESIGN SYSTEM: Acme"));
        assert!(rendered.contains("── STYLE"));
        assert!(rendered.contains("── LANDING"));
        assert!(rendered.contains("Query: landing page"));
    }

    #[test]
    fn test_markdown_render_has_headings_and_lists() {
        let system = fixture_system();
        let rendered = render(&system, RenderFormat::Markdown);

        assert!(rendered.starts_with("# Design System: Acme"));
        assert!(rendered.contains("## Style"));
        assert!(rendered.contains("- **notes:**"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let system = fixture_system();
        assert_eq!(
            render(&system, RenderFormat::Markdown),
            render(&system, RenderFormat::Markdown)
        );
    }

    #[test]
    fn test_empty_system_renders_placeholder() {
        let system = DesignSystem {
            project: "Empty".to_string(),
            query: "nothing".to_string(),
            sections: Vec::new(),
        };
        assert!(render(&system, RenderFormat::Ascii).contains("no matching guidance"));
        assert!(render(&system, RenderFormat::Markdown).contains("_No matching guidance found._"));
    }
}
