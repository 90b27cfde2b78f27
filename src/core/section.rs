//! Section - Nodes of the technical solution document
//!
//! A document is an ordered mapping of section keys to [`SectionNode`]s. Each
//! node may carry its own ordered `subsections` mapping, so the whole document
//! is a finite tree whose declaration order is the document's numbering.
//!
//! # Example
//! ```
//! use techsol::core::section::{SectionNode, Sections};
//!
//! let mut sections = Sections::new();
//! sections.insert("1_overview".to_string(), SectionNode::new("1. Overview"));
//! assert!(!sections["1_overview"].has_content());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered mapping of section key to node
pub type Sections = IndexMap<String, SectionNode>;

/// Field holding a node's title
pub const TITLE: &str = "title";
/// Field holding a node's text
pub const CONTENT: &str = "content";
/// Field holding a node's children
pub const SUBSECTIONS: &str = "subsections";

/// A single section of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionNode {
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsections: Option<Sections>,
}

impl SectionNode {
    /// Create a leaf section with empty content
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            subsections: None,
        }
    }

    /// Builder: attach child sections in the given order
    pub fn with_subsections<I, K>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = (K, SectionNode)>,
        K: Into<String>,
    {
        self.subsections = Some(children.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Builder: set initial content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Blank content counts as absent for both renderers
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Read one of the string fields by name
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            TITLE => Some(&self.title),
            CONTENT => Some(&self.content),
            _ => None,
        }
    }

    /// Mutable access to one of the string fields by name
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            TITLE => Some(&mut self.title),
            CONTENT => Some(&mut self.content),
            _ => None,
        }
    }

    /// Deep-convert into a plain JSON object, keeping child order
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(TITLE.to_string(), Value::String(self.title.clone()));
        obj.insert(CONTENT.to_string(), Value::String(self.content.clone()));
        if let Some(children) = &self.subsections {
            obj.insert(SUBSECTIONS.to_string(), sections_to_value(children));
        }
        Value::Object(obj)
    }
}

/// Deep-convert a mapping of sections into a plain JSON object
pub fn sections_to_value(sections: &Sections) -> Value {
    Value::Object(
        sections
            .iter()
            .map(|(key, node)| (key.clone(), node.to_value()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_content_ignores_whitespace() {
        let node = SectionNode::new("A").with_content("  \n\t ");
        assert!(!node.has_content());
        assert!(SectionNode::new("A").with_content(" x ").has_content());
    }

    #[test]
    fn test_to_value_preserves_order() {
        let node = SectionNode::new("Root").with_subsections([
            ("z_last_key_first", SectionNode::new("Z")),
            ("a_first_key_second", SectionNode::new("A")),
        ]);
        let value = node.to_value();
        let keys: Vec<&String> = value[SUBSECTIONS].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z_last_key_first", "a_first_key_second"]);
    }

    #[test]
    fn test_to_value_leaf_has_no_subsections_key() {
        let value = SectionNode::new("Leaf").to_value();
        assert!(value.get(SUBSECTIONS).is_none());
        assert_eq!(value[CONTENT], "");
    }

    #[test]
    fn test_field_access() {
        let mut node = SectionNode::new("T");
        *node.field_mut(CONTENT).unwrap() = "body".to_string();
        assert_eq!(node.field(CONTENT), Some("body"));
        assert_eq!(node.field(TITLE), Some("T"));
        assert!(node.field(SUBSECTIONS).is_none());
        assert!(node.field_mut("other").is_none());
    }

    #[test]
    fn test_deserialize_defaults_content() {
        let node: SectionNode = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        assert_eq!(node.content, "");
        assert!(node.subsections.is_none());
    }
}
