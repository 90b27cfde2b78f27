//! MCP tool arguments for the technical solution document
//!
//! Arguments arrive as loosely typed JSON. Each tool gets a typed params struct
//! that is checked here, before the store sees anything.

use serde_json::{Map, Value};
use tracing::warn;

use crate::core::error::ParseError;
use crate::core::store::UpdateMode;

pub const QUERY_TOOL: &str = "queryTechnicalSolutionContext";
pub const UPDATE_TOOL: &str = "updateTechnicalSolutionContext";
pub const RENDER_TOOL: &str = "renderTechnicalSolutionDocument";

/// Read the whole document or the value at one path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    /// `None` means the whole document
    pub section_path: Option<String>,
}

impl QueryParams {
    /// Missing or null arguments select the whole document
    pub fn parse(args: &Value) -> Result<Self, ParseError> {
        let obj = match args {
            Value::Null => return Ok(Self::default()),
            Value::Object(obj) => obj,
            _ => return Err(ParseError::NotAnObject("query")),
        };

        let section_path = match obj.get("sectionPath") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(ParseError::InvalidSectionPath),
        };

        Ok(Self { section_path })
    }
}

/// Write one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateParams {
    pub path: String,
    pub content: String,
    pub mode: UpdateMode,
}

impl UpdateParams {
    pub fn parse(args: &Value) -> Result<Self, ParseError> {
        let obj = args.as_object().ok_or(ParseError::NotAnObject("update"))?;

        let path = match obj.get("path") {
            Some(Value::String(p)) if !p.trim().is_empty() => p.clone(),
            _ => return Err(ParseError::MissingPath),
        };

        let content = match obj.get("content") {
            None => return Err(ParseError::MissingContent),
            Some(value) => coerce_content(&path, value),
        };

        let mode = match obj.get("mode") {
            None => UpdateMode::default(),
            Some(Value::String(m)) => m.parse()?,
            Some(other) => return Err(ParseError::InvalidMode(other.to_string())),
        };

        Ok(Self {
            path,
            content,
            mode,
        })
    }
}

/// Anything that is not a string is stored as text, with a warning.
/// `null` becomes empty content, other values their JSON text.
fn coerce_content(path: &str, value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => {
            warn!(path = %path, "Content for \"{}\" is null, treating it as empty", path);
            String::new()
        }
        other => {
            warn!(path = %path, "Content for \"{}\" is not a string, storing {} as text", path, other);
            other.to_string()
        }
    }
}

/// Which text view to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Outline,
    Markdown,
}

/// Render the document as text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderParams {
    pub format: RenderFormat,
    /// Only honoured by the outline view
    pub section_path: Option<String>,
}

impl RenderParams {
    pub fn parse(args: &Value) -> Result<Self, ParseError> {
        let empty = Map::new();
        let obj = match args {
            Value::Null => &empty,
            Value::Object(obj) => obj,
            _ => return Err(ParseError::NotAnObject("render")),
        };

        let format = match obj.get("format") {
            None | Some(Value::Null) => RenderFormat::default(),
            Some(Value::String(f)) if f == "outline" => RenderFormat::Outline,
            Some(Value::String(f)) if f == "markdown" => RenderFormat::Markdown,
            Some(other) => return Err(ParseError::InvalidFormat(other.to_string())),
        };

        let section_path = match obj.get("sectionPath") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(ParseError::InvalidSectionPath),
        };

        Ok(Self {
            format,
            section_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_defaults() {
        assert_eq!(QueryParams::parse(&Value::Null).unwrap().section_path, None);
        assert_eq!(QueryParams::parse(&json!({})).unwrap().section_path, None);
        assert_eq!(
            QueryParams::parse(&json!({"sectionPath": null})).unwrap().section_path,
            None
        );
    }

    #[test]
    fn test_query_rejects_bad_shapes() {
        assert_eq!(
            QueryParams::parse(&json!("1_overview")),
            Err(ParseError::NotAnObject("query"))
        );
        assert_eq!(
            QueryParams::parse(&json!({"sectionPath": 3})),
            Err(ParseError::InvalidSectionPath)
        );
    }

    #[test]
    fn test_update_minimal() {
        let params = UpdateParams::parse(&json!({"path": "a.content", "content": ""})).unwrap();
        assert_eq!(params.mode, UpdateMode::Overwrite);
        assert_eq!(params.content, "");
    }

    #[test]
    fn test_update_requires_path() {
        assert_eq!(
            UpdateParams::parse(&json!({"path": "", "content": "x"})),
            Err(ParseError::MissingPath)
        );
        assert_eq!(
            UpdateParams::parse(&json!({"content": "x"})),
            Err(ParseError::MissingPath)
        );
        assert_eq!(
            UpdateParams::parse(&json!({"path": 1, "content": "x"})),
            Err(ParseError::MissingPath)
        );
    }

    #[test]
    fn test_update_requires_content() {
        assert_eq!(
            UpdateParams::parse(&json!({"path": "a.content"})),
            Err(ParseError::MissingContent)
        );
    }

    #[test]
    fn test_update_coerces_non_string_content() {
        let params = UpdateParams::parse(&json!({"path": "a.content", "content": 42})).unwrap();
        assert_eq!(params.content, "42");

        let params = UpdateParams::parse(
            &json!({"path": "6_appendix.content", "content": null, "mode": "append"}),
        )
        .unwrap();
        assert_eq!(params.content, "");
        assert_eq!(params.mode, UpdateMode::Append);

        let params = UpdateParams::parse(&json!({"path": "a.content", "content": ["a"]})).unwrap();
        assert_eq!(params.content, r#"["a"]"#);

        let params =
            UpdateParams::parse(&json!({"path": "a.content", "content": {"k": 1}})).unwrap();
        assert_eq!(params.content, r#"{"k":1}"#);
    }

    #[test]
    fn test_update_mode() {
        let params =
            UpdateParams::parse(&json!({"path": "a.content", "content": "x", "mode": "append"}))
                .unwrap();
        assert_eq!(params.mode, UpdateMode::Append);

        assert!(matches!(
            UpdateParams::parse(&json!({"path": "a.content", "content": "x", "mode": "replace"})),
            Err(ParseError::InvalidMode(_))
        ));
        assert!(matches!(
            UpdateParams::parse(&json!({"path": "a.content", "content": "x", "mode": null})),
            Err(ParseError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_update_not_object() {
        assert_eq!(
            UpdateParams::parse(&Value::Null),
            Err(ParseError::NotAnObject("update"))
        );
    }

    #[test]
    fn test_render_params() {
        assert_eq!(RenderParams::parse(&Value::Null).unwrap(), RenderParams::default());
        let params = RenderParams::parse(&json!({"format": "markdown"})).unwrap();
        assert_eq!(params.format, RenderFormat::Markdown);
        assert!(RenderParams::parse(&json!({"format": "html"})).is_err());
    }
}
