//! MCP Tool handlers

pub mod document;

use serde_json::Value;

use super::state::ServerState;
use super::tools::{QUERY_TOOL, RENDER_TOOL, UPDATE_TOOL};

/// Result type for tool handlers
pub type ToolResult = Result<String, String>;

/// Dispatch a tool call to the appropriate handler
pub fn dispatch_tool(state: &mut ServerState, name: &str, args: &Value) -> ToolResult {
    match name {
        QUERY_TOOL => document::do_query(state, args),
        UPDATE_TOOL => document::do_update(state, args),
        RENDER_TOOL => document::do_render(state, args),
        _ => Err(format!("Unknown tool: {}", name)),
    }
}
