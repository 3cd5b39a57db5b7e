//! Argument surface and the closed command variant behind it.
//!
//! Flag combinations are validated eagerly, before any retrieval or write,
//! by converting the raw flag set into a [`Command`] that carries only the
//! fields valid for its mode.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use designref_design_system::RenderFormat;

/// Environment variable overriding the knowledge-base directory.
pub const DATA_DIR_ENV: &str = "DESIGNREF_DATA_DIR";

/// BM25 search over UI/UX design guidelines, with design-system synthesis.
#[derive(Parser, Debug)]
#[command(name = "designref", version, about)]
pub struct Cli {
    /// Search query
    pub query: String,

    /// Search one guidance domain (style, color, ux, ...)
    #[arg(short = 'd', long, conflicts_with = "stack")]
    pub domain: Option<String>,

    /// Search one stack-specific guideline set (html-tailwind, react, nextjs)
    #[arg(short = 's', long)]
    pub stack: Option<String>,

    /// Maximum results to return
    #[arg(short = 'n', long = "max-results", default_value_t = 3)]
    pub max_results: usize,

    /// Print the result envelope as JSON
    #[arg(long)]
    pub json: bool,

    /// Generate a complete design-system recommendation
    #[arg(long = "design-system")]
    pub design_system: bool,

    /// Project name for design-system output
    #[arg(short = 'p', long = "project-name")]
    pub project_name: Option<String>,

    /// Output format for the design system
    #[arg(short = 'f', long, value_enum, default_value = "ascii")]
    pub format: FormatArg,

    /// Save the design system to design-system/<project-slug>/MASTER.md
    #[arg(long)]
    pub persist: bool,

    /// Also write a page-specific override file under pages/
    #[arg(long)]
    pub page: Option<String>,

    /// Output directory for persisted files (default: current directory)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Directory holding the knowledge bases (default: ./data)
    #[arg(long = "data-dir")]
    pub data_dir: Option<PathBuf>,
}

/// Design-system output format flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Ascii,
    Markdown,
}

impl From<FormatArg> for RenderFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Ascii => RenderFormat::Ascii,
            FormatArg::Markdown => RenderFormat::Markdown,
        }
    }
}

/// Invalid flag combinations, rejected before any work happens.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgsError {
    #[error("--page requires --persist")]
    PageRequiresPersist,

    #[error("--persist, --page, and --output-dir can only be used with --design-system")]
    PersistRequiresDesignSystem,

    #[error("--json is not supported with --design-system")]
    JsonWithDesignSystem,

    #[error("--domain/--stack do not apply to --design-system (it searches a fixed domain set)")]
    SelectorWithDesignSystem,

    #[error("choose a selector: --domain <DOMAIN> or --stack <STACK>")]
    MissingSelector,
}

/// The validated invocation modes. Each variant carries exactly the fields
/// that are meaningful for it, so an invalid combination cannot be
/// represented past this point.
#[derive(Debug)]
pub enum Command {
    DomainSearch {
        query: String,
        domain: String,
        limit: usize,
        json: bool,
    },
    StackSearch {
        query: String,
        stack: String,
        limit: usize,
        json: bool,
    },
    Synthesize {
        query: String,
        project_name: Option<String>,
        format: RenderFormat,
        persist: Option<PersistSpec>,
    },
}

/// Persistence options, present only when `--persist` was given.
#[derive(Debug)]
pub struct PersistSpec {
    pub page: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    /// Resolve the knowledge-base directory: flag, then environment, then
    /// `./data`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Validate the flag set into a closed command variant.
    pub fn into_command(self) -> Result<Command, ArgsError> {
        if self.page.is_some() && !self.persist {
            return Err(ArgsError::PageRequiresPersist);
        }

        if self.design_system {
            if self.json {
                return Err(ArgsError::JsonWithDesignSystem);
            }
            if self.domain.is_some() || self.stack.is_some() {
                return Err(ArgsError::SelectorWithDesignSystem);
            }
            let persist = self.persist.then_some(PersistSpec {
                page: self.page,
                output_dir: self.output_dir,
            });
            return Ok(Command::Synthesize {
                query: self.query,
                project_name: self.project_name,
                format: self.format.into(),
                persist,
            });
        }

        if self.persist || self.page.is_some() || self.output_dir.is_some() {
            return Err(ArgsError::PersistRequiresDesignSystem);
        }

        if let Some(domain) = self.domain {
            Ok(Command::DomainSearch {
                query: self.query,
                domain,
                limit: self.max_results,
                json: self.json,
            })
        } else if let Some(stack) = self.stack {
            Ok(Command::StackSearch {
                query: self.query,
                stack,
                limit: self.max_results,
                json: self.json,
            })
        } else {
            Err(ArgsError::MissingSelector)
        }
    }
}
