//! MCP (Model Context Protocol) Server
//!
//! Exposes the technical solution document via MCP tools for AI integration.
//!
//! # Tools
//! - `queryTechnicalSolutionContext` - Read the whole document or one path
//! - `updateTechnicalSolutionContext` - Overwrite or append to one field
//! - `renderTechnicalSolutionDocument` - Outline or Markdown view

pub mod handlers;
pub mod jsonrpc;
pub mod server;
pub mod state;
pub mod tools;

pub use server::{run_mcp_server, McpServer};
pub use state::ServerState;
