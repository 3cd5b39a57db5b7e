//! # Design-system synthesis for designref
//!
//! Aggregates several domain retrievals into one composite design-system
//! document, renders it for the terminal or as markdown, and optionally
//! persists it to a two-tier store: a master document per project plus
//! page-scoped overrides that take precedence over it.

pub mod error;
pub mod persist;
pub mod render;
pub mod synthesizer;

pub use error::{DesignSystemError, Result};
pub use persist::{MASTER_FILE, PAGES_DIR, PersistReport, STORE_DIR, persist, slugify};
pub use render::{RenderFormat, render};
pub use synthesizer::{DESIGN_SYSTEM_DOMAINS, DesignSystem, Section, synthesize};
