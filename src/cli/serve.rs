//! Serve command - Start MCP server

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::core::store::DocumentStore;
use crate::mcp::{run_mcp_server, McpServer};

/// Start MCP server for AI integration
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Template file (.toml or .json) instead of the built-in one
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Heading of the rendered Markdown document
    #[arg(long)]
    pub title: Option<String>,

    /// Server name reported to the client
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run(args: ServeArgs, config: &Config) -> Result<()> {
    let template = config.template(args.template.as_deref())?;
    let title = args.title.unwrap_or_else(|| config.document.title.clone());
    let name = args.name.unwrap_or_else(|| config.server.name.clone());

    info!(
        sections = template.sections().len(),
        title = %title,
        "Serving technical solution document"
    );

    let store = DocumentStore::new(&template).with_title(title);
    run_mcp_server(McpServer::new(store).with_name(name))
}
