//! Hierarchical persistence: one master document per project, plus
//! page-scoped overrides layered on top.
//!
//! Layout on disk:
//!
//! ```text
//! <output_dir>/design-system/<project-slug>/MASTER.md
//! <output_dir>/design-system/<project-slug>/pages/<page-slug>.md
//! ```
//!
//! A page override, when present, takes precedence over the master when
//! reading. Writes always overwrite; concurrent processes are last-write-
//! wins at the file level.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{DesignSystemError, Result};

/// Fixed subdirectory holding all persisted design systems.
pub const STORE_DIR: &str = "design-system";

/// Filename of the per-project master document.
pub const MASTER_FILE: &str = "MASTER.md";

/// Subdirectory of a project holding page overrides.
pub const PAGES_DIR: &str = "pages";

/// Absolute paths written by one `persist` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistReport {
    /// The master document, always written.
    pub master: PathBuf,

    /// The page override, when a page name was supplied.
    pub page: Option<PathBuf>,
}

/// Normalize a human-supplied name into a filesystem-safe slug.
///
/// Total for any input: ASCII alphanumerics are lowercased and kept, every
/// other character becomes a separator, runs collapse to a single `-`, and
/// leading/trailing separators are trimmed. Path separators and traversal
/// sequences can therefore never survive. An empty result yields
/// `fallback`. Idempotent: `slugify(slugify(x), f) == slugify(x, f)`.
pub fn slugify(name: &str, fallback: &str) -> String {
    let mut slug = String::new();
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

/// Write a rendered document into the hierarchical store.
///
/// Always writes the master (idempotent: identical input produces
/// byte-identical files); additionally writes one page override when
/// `page` is given. Other pages' files are never touched.
pub fn persist(
    document: &str,
    project_name: &str,
    page: Option<&str>,
    output_dir: Option<&Path>,
) -> Result<PersistReport> {
    let base = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|source| DesignSystemError::Persist {
            path: PathBuf::from("."),
            source,
        })?,
    };

    let project_slug = slugify(project_name, "default");
    let project_dir = base.join(STORE_DIR).join(&project_slug);
    create_dir(&project_dir)?;

    let master = project_dir.join(MASTER_FILE);
    write_file(&master, document)?;
    info!(path = %master.display(), "wrote master document");

    let page_path = match page {
        Some(page_name) => {
            let pages_dir = project_dir.join(PAGES_DIR);
            create_dir(&pages_dir)?;

            let page_slug = slugify(page_name, "page");
            let path = pages_dir.join(format!("{page_slug}.md"));
            write_file(&path, document)?;
            info!(path = %path.display(), "wrote page override");
            Some(absolute(&path)?)
        }
        None => None,
    };

    Ok(PersistReport {
        master: absolute(&master)?,
        page: page_path,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| DesignSystemError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| DesignSystemError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| DesignSystemError::Persist {
        path: path.to_path_buf(),
        source,
    })
}
