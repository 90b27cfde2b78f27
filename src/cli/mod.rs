//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod render;
pub mod serve;
pub mod tree;

/// techsol - Technical solution document server
///
/// Serves a structured technical solution document to AI agents over MCP.
#[derive(Parser, Debug)]
#[command(name = "techsol")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "TECHSOL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server on stdio
    Serve(serve::ServeArgs),

    /// Show the template's section tree
    Tree(tree::TreeArgs),

    /// Print the (empty) template as Markdown, outline or JSON
    Render(render::RenderArgs),
}
