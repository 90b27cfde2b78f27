//! `techsol render` command
//!
//! Prints the starting document in one of the views the server offers.
//!
//! # Usage
//! ```bash
//! techsol render                      # Markdown skeleton
//! techsol render --format json        # Full tree as JSON
//! techsol render --template rfc.toml --format outline
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::config::Config;
use crate::core::store::DocumentStore;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Headings for every section
    #[default]
    Markdown,
    /// Only sections with content, labelled by path
    Outline,
    /// The whole tree as JSON
    Json,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template file (.toml or .json) instead of the built-in one
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: OutputFormat,

    /// Heading of the Markdown document
    #[arg(long)]
    pub title: Option<String>,
}

pub fn run(args: RenderArgs, config: &Config) -> Result<()> {
    let template = config.template(args.template.as_deref())?;
    let title = args.title.unwrap_or_else(|| config.document.title.clone());
    let store = DocumentStore::new(&template).with_title(title);

    println!("{}", render(&store, args.format)?);
    Ok(())
}

fn render(store: &DocumentStore, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Markdown => store.render_markdown(),
        OutputFormat::Outline => store.render_outline(None),
        OutputFormat::Json => serde_json::to_string_pretty(&store.get_by_path(None))?,
    })
}
