//! Document handlers for MCP (query, update, render)

use serde_json::Value;
use tracing::debug;

use super::ToolResult;
use crate::mcp::state::ServerState;
use crate::mcp::tools::{QueryParams, RenderFormat, RenderParams, UpdateParams};

/// Whole document, a subtree as JSON, or a field's raw text
pub fn do_query(state: &ServerState, args: &Value) -> ToolResult {
    let params = QueryParams::parse(args).map_err(|e| e.to_string())?;
    let path = params.section_path.as_deref();

    match state.store.get_by_path(path) {
        Some(Value::String(text)) => Ok(text),
        Some(value) => serde_json::to_string_pretty(&value)
            .map_err(|e| format!("Serialization error: {}", e)),
        None => {
            debug!(path = path.unwrap_or_default(), "Query found nothing");
            Ok(format!(
                "No data found at \"{}\".",
                path.unwrap_or_default()
            ))
        }
    }
}

/// Write one field; the text is `true` when the document changed
pub fn do_update(state: &mut ServerState, args: &Value) -> ToolResult {
    let params = UpdateParams::parse(args).map_err(|e| e.to_string())?;

    let changed = state
        .store
        .update_by_path(&params.path, &params.content, params.mode)
        .map_err(|e| e.to_string())?;

    Ok(changed.to_string())
}

/// Outline (optionally sliced) or Markdown text
pub fn do_render(state: &ServerState, args: &Value) -> ToolResult {
    let params = RenderParams::parse(args).map_err(|e| e.to_string())?;

    Ok(match params.format {
        RenderFormat::Outline => state.store.render_outline(params.section_path.as_deref()),
        RenderFormat::Markdown => state.store.render_markdown(),
    })
}
