//! Render - Text views of a document snapshot
//!
//! - **Outline**: indented listing of every section that has content, labelled
//!   with its full dotted path. Meant for a text-only reader that wants to skim
//!   the document without parsing a nested structure.
//! - **Markdown**: the finished document, one heading per section.

use super::path::{DocPath, Target};
use super::section::{SectionNode, Sections, SUBSECTIONS};

/// Default heading for the rendered Markdown document
pub const DEFAULT_DOCUMENT_TITLE: &str = "技术方案文档";

/// Deepest Markdown heading level
pub const MAX_HEADING_LEVEL: usize = 6;

const INDENT: &str = "  ";

/// Render the outline of the whole document or of the slice under `prefix`.
///
/// A missing prefix is reported as a message, never as an error.
pub fn outline(root: &Sections, prefix: Option<&str>) -> String {
    let mut lines = Vec::new();

    let prefix = match prefix.filter(|p| !p.is_empty()) {
        None => {
            outline_siblings(root, None, &mut lines);
            return lines.join("\n");
        }
        Some(prefix) => prefix,
    };

    let resolved = DocPath::parse(prefix)
        .ok()
        .and_then(|path| path.resolve(root).ok().map(|target| (path, target)));

    match resolved {
        None => format!("Path prefix \"{}\" not found in document.", prefix),
        Some((path, Target::Node(node))) => {
            outline_node(node, &path, 0, &mut lines);
            lines.join("\n")
        }
        Some((path, Target::Sections(map))) => {
            outline_siblings(map, Some(&path), &mut lines);
            lines.join("\n")
        }
        Some((_, field @ Target::Field(_))) => format!(
            "Path prefix \"{}\" is a field, not a section. Value: {}",
            prefix,
            field.to_value()
        ),
    }
}

/// Each child rendered as its own top-level block
fn outline_siblings(map: &Sections, base: Option<&DocPath>, lines: &mut Vec<String>) {
    for (key, node) in map {
        let path = match base {
            Some(base) => base.child(key),
            None => DocPath::from_segments([key.as_str()]),
        };
        outline_node(node, &path, 0, lines);
    }
}

fn outline_node(node: &SectionNode, path: &DocPath, level: usize, lines: &mut Vec<String>) {
    if node.has_content() {
        let indent = INDENT.repeat(level);
        let body_indent = INDENT.repeat(level + 1);
        lines.push(format!("{}[path: {}] {}", indent, path, node.title));

        let body = node
            .content
            .trim()
            .split('\n')
            .collect::<Vec<_>>()
            .join(format!("\n{}", body_indent).as_str());
        lines.push(format!("{}content: {}", body_indent, body));
    }

    // Content-less containers still expose their descendants
    if let Some(children) = &node.subsections {
        let base = path.child(SUBSECTIONS);
        for (key, child) in children {
            outline_node(child, &base.child(key), level + 1, lines);
        }
    }
}

/// Render the whole document as Markdown
pub fn markdown(title: &str, root: &Sections) -> String {
    let mut blocks = vec![format!("# {}\n", title)];
    for node in root.values() {
        markdown_node(node, 1, &mut blocks);
    }
    blocks.join("\n")
}

fn markdown_node(node: &SectionNode, level: usize, blocks: &mut Vec<String>) {
    blocks.push(format!(
        "{} {}\n",
        "#".repeat(level.min(MAX_HEADING_LEVEL)),
        node.title
    ));

    if node.has_content() {
        blocks.push(format!("{}\n", node.content.trim()));
    }

    if let Some(children) = &node.subsections {
        for child in children.values() {
            markdown_node(child, level + 1, blocks);
        }
    }

    blocks.push(String::new());
}
