//! techsol CLI - Entry point
//!
//! Usage: techsol <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use techsol::cli::{Cli, Commands};
use techsol::config::Config;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing; stdout carries the MCP protocol, so logs go to stderr
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => techsol::cli::serve::run(args, &config),
        Commands::Tree(args) => techsol::cli::tree::run(args, &config),
        Commands::Render(args) => techsol::cli::render::run(args, &config),
    }
}
