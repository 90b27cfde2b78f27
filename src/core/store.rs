//! Store - The live technical solution document
//!
//! The store owns exactly one snapshot of the section tree. Every successful
//! update builds a new tree and swaps it in with a single assignment, so a
//! snapshot handed out earlier is never altered.
//!
//! # Key Points
//! - Reads never fail: a missing path is `None`, not an error
//! - Writes only target `content` or `title` of a section that already exists
//! - A write that would not change anything reports `false`

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::error::ParseError;
use super::path::{DocPath, Target};
use super::render::{self, DEFAULT_DOCUMENT_TITLE};
use super::section::{sections_to_value, SectionNode, Sections, SUBSECTIONS, TITLE};
use super::template::Template;

/// One immutable version of the whole tree
pub type Snapshot = Arc<Sections>;

/// How an update combines with the existing value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Replace the field verbatim
    #[default]
    Overwrite,
    /// Add to the end, newline-separated when the field is non-empty
    Append,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::Overwrite => "overwrite",
            UpdateMode::Append => "append",
        }
    }
}

impl FromStr for UpdateMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(UpdateMode::Overwrite),
            "append" => Ok(UpdateMode::Append),
            other => Err(ParseError::InvalidMode(format!("\"{}\"", other))),
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path-addressed document store
#[derive(Debug, Clone)]
pub struct DocumentStore {
    current: Snapshot,
    title: String,
}

impl DocumentStore {
    /// Fresh store with every field taken from the template
    pub fn new(template: &Template) -> Self {
        Self::from_snapshot(Arc::new(template.sections().clone()))
    }

    /// Resume from an existing snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: snapshot,
            title: DEFAULT_DOCUMENT_TITLE.to_string(),
        }
    }

    /// Builder: heading used at the top of the Markdown view
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Current snapshot; stays valid after later updates
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.current)
    }

    /// Look up a node, mapping or field.
    ///
    /// `None` or an empty path returns the whole document. Subtrees come back
    /// as plain JSON objects, fields as JSON strings.
    pub fn get_by_path(&self, path: Option<&str>) -> Option<Value> {
        let path = match path.filter(|p| !p.is_empty()) {
            None => return Some(sections_to_value(&self.current)),
            Some(p) => p,
        };

        let path = DocPath::parse(path).ok()?;
        path.resolve(&self.current).ok().map(|target| target.to_value())
    }

    /// Write `content` into the field at `path`.
    ///
    /// Returns `Ok(true)` when a new snapshot was installed, `Ok(false)` when
    /// the write was rejected or changed nothing, and `Err` for a blank path.
    pub fn update_by_path(
        &mut self,
        path: &str,
        content: &str,
        mode: UpdateMode,
    ) -> Result<bool, ParseError> {
        let path = DocPath::parse(path).map_err(|_| ParseError::MissingPath)?;

        let parent = match path.parent() {
            Some(parent) => parent,
            None => {
                warn!(path = %path, "Update rejected: \"{}\" is not a section field", path);
                return Ok(false);
            }
        };

        let node = match parent.resolve(&self.current) {
            Ok(Target::Node(node)) => node,
            Ok(_) => {
                warn!(path = %path, "Update rejected: \"{}\" is not a section", parent);
                return Ok(false);
            }
            Err(e) => {
                warn!(
                    path = %path,
                    "Update failed: parent path \"{}\" does not exist ({})",
                    parent, e
                );
                return Ok(false);
            }
        };

        // Parent resolved, so the path has a last segment
        let field = path.name().unwrap_or_default();
        let current = match node.field(field) {
            Some(value) => value,
            None => {
                warn!(path = %path, "Update rejected: \"{}\" is not a writable field", field);
                return Ok(false);
            }
        };

        let next = match mode {
            UpdateMode::Overwrite => content.to_string(),
            UpdateMode::Append if current.is_empty() => content.to_string(),
            UpdateMode::Append => format!("{}\n{}", current, content),
        };

        if field == TITLE && next.trim().is_empty() {
            warn!(path = %path, "Update rejected: title cannot be empty");
            return Ok(false);
        }

        if next == current {
            return Ok(false);
        }

        let mut tree = (*self.current).clone();
        match node_mut(&mut tree, &parent).and_then(|n| n.field_mut(field)) {
            Some(slot) => *slot = next,
            None => return Ok(false),
        }

        self.current = Arc::new(tree);
        info!(path = %path, mode = %mode, "Document updated");
        Ok(true)
    }

    /// Outline view of the whole document or of one slice
    pub fn render_outline(&self, prefix: Option<&str>) -> String {
        render::outline(&self.current, prefix)
    }

    /// Markdown view of the whole document
    pub fn render_markdown(&self) -> String {
        render::markdown(&self.title, &self.current)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(&Template::default())
    }
}

/// Mutable walk along `key(.subsections.key)*`
fn node_mut<'a>(root: &'a mut Sections, path: &DocPath) -> Option<&'a mut SectionNode> {
    let mut segments = path.segments().iter();
    let mut node = root.get_mut(segments.next()?)?;

    while let Some(segment) = segments.next() {
        if segment != SUBSECTIONS {
            return None;
        }
        node = node.subsections.as_mut()?.get_mut(segments.next()?)?;
    }

    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: &str = "1_overview.subsections.1_1_demand_background.content";

    #[test]
    fn test_get_whole_document() {
        let store = DocumentStore::default();
        let whole = store.get_by_path(None).unwrap();
        assert_eq!(store.get_by_path(Some("")), Some(whole.clone()));
        assert!(whole["6_appendix"]["title"].is_string());
    }

    #[test]
    fn test_get_distinguishes_missing_from_empty() {
        let store = DocumentStore::default();
        assert_eq!(store.get_by_path(Some(BG)), Some(Value::String(String::new())));
        assert_eq!(store.get_by_path(Some("1_overview.subsections.nope.content")), None);
        assert_eq!(store.get_by_path(Some("6_appendix.content.deeper")), None);
    }

    #[test]
    fn test_overwrite_then_read() {
        let mut store = DocumentStore::default();
        assert_eq!(store.update_by_path(BG, "legacy system", UpdateMode::Overwrite), Ok(true));
        assert_eq!(store.get_by_path(Some(BG)), Some(Value::from("legacy system")));
    }

    #[test]
    fn test_append_separates_with_newline() {
        let mut store = DocumentStore::default();
        store.update_by_path(BG, "A", UpdateMode::Append).unwrap();
        store.update_by_path(BG, "B", UpdateMode::Append).unwrap();
        assert_eq!(store.get_by_path(Some(BG)), Some(Value::from("A\nB")));
    }

    #[test]
    fn test_noop_write_returns_false() {
        let mut store = DocumentStore::default();
        assert_eq!(store.update_by_path(BG, "", UpdateMode::Overwrite), Ok(false));
        assert_eq!(store.update_by_path(BG, "", UpdateMode::Append), Ok(false));
    }

    #[test]
    fn test_missing_parent_rejected() {
        let mut store = DocumentStore::default();
        let before = store.snapshot();
        assert_eq!(store.update_by_path("missing.content", "x", UpdateMode::Overwrite), Ok(false));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_non_field_targets_rejected() {
        let mut store = DocumentStore::default();
        assert_eq!(store.update_by_path("6_appendix", "x", UpdateMode::Overwrite), Ok(false));
        assert_eq!(store.update_by_path("1_overview.subsections", "x", UpdateMode::Overwrite), Ok(false));
        assert_eq!(store.update_by_path("6_appendix.notes", "x", UpdateMode::Overwrite), Ok(false));
        assert_eq!(
            store.update_by_path("1_overview.subsections.1_2_target", "x", UpdateMode::Overwrite),
            Ok(false)
        );
    }

    #[test]
    fn test_blank_path_is_parse_error() {
        let mut store = DocumentStore::default();
        assert_eq!(
            store.update_by_path("  ", "x", UpdateMode::Overwrite),
            Err(ParseError::MissingPath)
        );
    }

    #[test]
    fn test_title_writable_but_not_blank() {
        let mut store = DocumentStore::default();
        assert_eq!(store.update_by_path("6_appendix.title", "6. Appendix", UpdateMode::Overwrite), Ok(true));
        assert_eq!(store.update_by_path("6_appendix.title", " ", UpdateMode::Overwrite), Ok(false));
        assert_eq!(store.get_by_path(Some("6_appendix.title")), Some(Value::from("6. Appendix")));
    }

    #[test]
    fn test_old_snapshot_unaffected() {
        let mut store = DocumentStore::default();
        let before = store.snapshot();
        store.update_by_path("6_appendix.content", "links", UpdateMode::Overwrite).unwrap();
        assert_eq!(before["6_appendix"].content, "");
        assert_eq!(store.snapshot()["6_appendix"].content, "links");
    }

    #[test]
    fn test_update_preserves_order() {
        let mut store = DocumentStore::default();
        let before: Vec<String> = store.snapshot().keys().cloned().collect();
        store
            .update_by_path("3_system_analysis_design.subsections.3_3_basic_component_config_change.subsections.3_3_1_mq_change.content", "new topic", UpdateMode::Overwrite)
            .unwrap();
        let after: Vec<String> = store.snapshot().keys().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("append".parse::<UpdateMode>(), Ok(UpdateMode::Append));
        assert_eq!("overwrite".parse::<UpdateMode>(), Ok(UpdateMode::Overwrite));
        assert!("Append".parse::<UpdateMode>().is_err());
    }

    #[test]
    fn test_markdown_uses_title() {
        let store = DocumentStore::default().with_title("Payments revamp");
        assert!(store.render_markdown().starts_with("# Payments revamp\n"));
    }
}
