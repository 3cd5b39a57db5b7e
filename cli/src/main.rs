//! designref: BM25 search over UI/UX design guidelines, with
//! design-system synthesis and hierarchical persistence.

mod args;
mod output;

use anyhow::Result;
use clap::Parser;

use designref_corpus::CorpusCache;
use designref_design_system::{RenderFormat, persist, render, synthesize};
use designref_retrieval::SearchService;

use crate::args::{Cli, Command};

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let data_dir = cli.resolve_data_dir();
    let command = cli.into_command()?;

    run(command, CorpusCache::new(data_dir))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, cache: CorpusCache) -> Result<()> {
    let mut service = SearchService::new(cache);

    match command {
        Command::DomainSearch { query, domain, limit, json } => {
            let envelope = service.search_domain(&query, &domain, limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                println!("{}", output::format_envelope(&envelope));
            }
        }
        Command::StackSearch { query, stack, limit, json } => {
            let envelope = service.search_stack(&query, &stack, limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                println!("{}", output::format_envelope(&envelope));
            }
        }
        Command::Synthesize { query, project_name, format, persist: persist_spec } => {
            let system = synthesize(&mut service, &query, project_name.as_deref())?;
            let rendered = render(&system, format);
            println!("{rendered}");

            if let Some(spec) = persist_spec {
                // The store always holds markdown, regardless of the
                // display format.
                let document = match format {
                    RenderFormat::Markdown => rendered,
                    RenderFormat::Ascii => render(&system, RenderFormat::Markdown),
                };
                let report = persist(
                    &document,
                    &system.project,
                    spec.page.as_deref(),
                    spec.output_dir.as_deref(),
                )?;
                println!("\n{}", output::format_persist_confirmation(&report));
            }
        }
    }

    Ok(())
}
