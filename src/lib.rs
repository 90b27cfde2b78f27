//! techsol - Technical solution document server
//!
//! Keeps one structured technical solution document in memory and lets an AI
//! agent fill it in over MCP, one path at a time.
//!
//! ## Key Concepts
//!
//! - **Template**: the fixed section shape the document starts from
//! - **Dotted paths**: `1_overview.subsections.1_2_target.content`
//! - **Snapshots**: every write installs a new immutable tree
//! - **Two views**: an indented outline for agents, Markdown for humans

pub mod cli;
pub mod config;
pub mod core;
pub mod mcp;

pub use core::path::DocPath;
pub use core::section::{SectionNode, Sections};
pub use core::store::{DocumentStore, UpdateMode};
pub use core::template::Template;
pub use mcp::run_mcp_server;
