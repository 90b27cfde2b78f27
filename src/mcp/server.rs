//! MCP Server implementation for the technical solution document
//!
//! Implements the Model Context Protocol (JSON-RPC 2.0) server directly
//! without external SDK dependencies. One request per line; each request runs
//! to completion before the next line is read.

use std::io::{BufRead, BufReader, Write};

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::handlers::dispatch_tool;
use super::jsonrpc::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use super::state::ServerState;
use super::tools::{QUERY_TOOL, RENDER_TOOL, UPDATE_TOOL};
use crate::core::store::DocumentStore;

/// Name reported in `serverInfo` unless configured otherwise
pub const DEFAULT_SERVER_NAME: &str = "technical-solution-server";

/// MCP Server handler
pub struct McpServer {
    state: ServerState,
    name: String,
}

impl McpServer {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            state: ServerState::new(store),
            name: DEFAULT_SERVER_NAME.to_string(),
        }
    }

    /// Builder: name reported to the client
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Handle a JSON-RPC request
    pub fn handle_request(&mut self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        if !request.has_valid_version() {
            warn!(version = %request.jsonrpc, "Rejecting message with unsupported jsonrpc version");
            return request.id.clone().map(|id| {
                JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!(
                        "Invalid request: jsonrpc must be \"{}\", got \"{}\"",
                        JSONRPC_VERSION, request.jsonrpc
                    ),
                )
            });
        }

        if request.is_notification() {
            match request.method.as_str() {
                "notifications/initialized" => {
                    info!(session = %self.state.session_id, "Client initialized");
                }
                "notifications/cancelled" => debug!("Request cancelled"),
                other => debug!("Unknown notification: {}", other),
            }
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "tools/list" => Ok(handle_list_tools()),
            "tools/call" => self.handle_call_tool(&request.params),
            "ping" => Ok(json!({})),
            _ => Err((
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err((code, msg)) => JsonRpcResponse::error(id, code, msg),
        })
    }

    /// Handle one raw line; `None` for notifications
    pub fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(&request),
            Err(e) => Some(JsonRpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {}", e),
            )),
        }
    }

    /// Serve newline-delimited JSON-RPC until the reader is exhausted
    pub fn serve<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> anyhow::Result<()> {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            debug!("Received: {}", truncate(&line, 100));

            if let Some(response) = self.handle_line(&line) {
                let json = serde_json::to_string(&response)?;
                debug!("Sending: {}", truncate(&json, 100));
                writeln!(writer, "{}", json)?;
                writer.flush()?;
            }
        }

        Ok(())
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": self.name,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": "Fills in a technical solution document section by section. Use queryTechnicalSolutionContext to see what is there, updateTechnicalSolutionContext to write a section's content, renderTechnicalSolutionDocument to show the result."
        })
    }

    fn handle_call_tool(&mut self, params: &Value) -> Result<Value, (i64, String)> {
        let name = params["name"]
            .as_str()
            .ok_or((INVALID_PARAMS, "Missing tool name".to_string()))?;
        let arguments = &params["arguments"];

        match dispatch_tool(&mut self.state, name, arguments) {
            Ok(text) => Ok(json!({
                "content": [{
                    "type": "text",
                    "text": text
                }]
            })),
            Err(e) => {
                warn!(tool = name, "Tool call failed: {}", e);
                Ok(json!({
                    "content": [{
                        "type": "text",
                        "text": format!("Error: {}", e)
                    }],
                    "isError": true
                }))
            }
        }
    }
}

fn handle_list_tools() -> Value {
    json!({
        "tools": [
            {
                "name": QUERY_TOOL,
                "description": "Query the technical solution document being built. Without sectionPath returns the whole document as JSON. With a path returns that section (title, content, subsections) or a single field. Paths join section keys with '.', children live under 'subsections'. Example: queryTechnicalSolutionContext({\"sectionPath\": \"2_demand_analysis.subsections.2_1_demand_scope.content\"})",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "sectionPath": { "type": "string", "description": "Dotted path such as '1_overview.subsections.1_1_demand_background.content'. Omit for the whole document." }
                    },
                    "required": []
                }
            },
            {
                "name": UPDATE_TOOL,
                "description": "Write one field of the technical solution document. The parent section must already exist. Returns true when the document changed. Example: updateTechnicalSolutionContext({\"path\": \"1_overview.subsections.1_1_demand_background.content\", \"content\": \"...\", \"mode\": \"append\"})",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "path": { "type": "string", "description": "Dotted path ending in '.content' (or '.title')." },
                        "content": { "type": "string", "description": "Text to write or append." },
                        "mode": { "type": "string", "enum": ["overwrite", "append"], "description": "'overwrite' replaces, 'append' adds on a new line. Default: overwrite", "default": "overwrite" }
                    },
                    "required": ["path", "content"]
                }
            },
            {
                "name": RENDER_TOOL,
                "description": "Render the technical solution document as text. 'outline' lists every filled section with its path (optionally only under sectionPath); 'markdown' produces the finished document.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "format": { "type": "string", "enum": ["outline", "markdown"], "description": "Default: outline", "default": "outline" },
                        "sectionPath": { "type": "string", "description": "Outline only: limit to this path prefix" }
                    }
                }
            }
        ]
    })
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Run the MCP server with STDIO transport
pub fn run_mcp_server(server: McpServer) -> anyhow::Result<()> {
    let mut server = server;
    info!(session = %server.state.session_id, "MCP server starting");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    server.serve(BufReader::new(stdin.lock()), stdout.lock())?;

    info!("MCP server stopping");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> McpServer {
        McpServer::new(DocumentStore::default())
    }

    fn call(server: &mut McpServer, line: &str) -> Value {
        let response = server.handle_line(line).expect("response");
        serde_json::to_value(&response).unwrap()
    }

    #[test]
    fn test_initialize() {
        let mut s = server().with_name("docs");
        let res = call(&mut s, r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#);
        assert_eq!(res["result"]["serverInfo"]["name"], "docs");
        assert_eq!(res["id"], 1);
    }

    #[test]
    fn test_notification_has_no_response() {
        let mut s = server();
        assert!(s
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .is_none());
    }

    #[test]
    fn test_wrong_jsonrpc_version_is_invalid_request() {
        let mut s = server();
        let res = call(&mut s, r#"{"jsonrpc":"1.0","id":7,"method":"ping"}"#);
        assert_eq!(res["error"]["code"], INVALID_REQUEST);
        assert_eq!(res["id"], 7);
        assert!(res.get("result").is_none());

        // Notifications stay silent even when malformed
        assert!(s
            .handle_line(r#"{"jsonrpc":"1.0","method":"notifications/initialized"}"#)
            .is_none());
    }

    #[test]
    fn test_rejected_version_does_not_touch_document() {
        let mut s = server();
        let res = call(
            &mut s,
            r#"{"jsonrpc":"3.0","id":8,"method":"tools/call","params":{"name":"updateTechnicalSolutionContext","arguments":{"path":"6_appendix.content","content":"x"}}}"#,
        );
        assert_eq!(res["error"]["code"], INVALID_REQUEST);
        assert_eq!(
            s.state().store.get_by_path(Some("6_appendix.content")),
            Some(Value::from(""))
        );
    }

    #[test]
    fn test_list_tools() {
        let mut s = server();
        let res = call(&mut s, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#);
        let names: Vec<&str> = res["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, [QUERY_TOOL, UPDATE_TOOL, RENDER_TOOL]);
    }

    #[test]
    fn test_parse_error() {
        let mut s = server();
        let res = call(&mut s, "{not json");
        assert_eq!(res["error"]["code"], PARSE_ERROR);
        assert!(res["id"].is_null());
    }

    #[test]
    fn test_unknown_method() {
        let mut s = server();
        let res = call(&mut s, r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#);
        assert_eq!(res["error"]["code"], METHOD_NOT_FOUND);
    }

    #[test]
    fn test_missing_tool_name() {
        let mut s = server();
        let res = call(&mut s, r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{}}"#);
        assert_eq!(res["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_tool_error_flag() {
        let mut s = server();
        let res = call(
            &mut s,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"updateTechnicalSolutionContext","arguments":{"path":""}}}"#,
        );
        assert_eq!(res["result"]["isError"], true);
        let text = res["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("ParseError"));
    }

    #[test]
    fn test_serve_round_trip() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"updateTechnicalSolutionContext","arguments":{"path":"6_appendix.content","content":"see wiki"}}}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"queryTechnicalSolutionContext","arguments":{"sectionPath":"6_appendix.content"}}}"#,
            "\n"
        );

        let mut out = Vec::new();
        server().serve(input.as_bytes(), &mut out).unwrap();

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["result"]["content"][0]["text"], "true");
        assert_eq!(lines[1]["result"]["content"][0]["text"], "see wiki");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("技术方案", 2), "技术");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
