//! Path - Dotted addresses into the document tree
//!
//! A path names either a section node, a `subsections` mapping, or one of a
//! node's string fields.
//!
//! # Examples
//! - `1_overview`
//! - `1_overview.subsections.1_2_target`
//! - `1_overview.subsections.1_2_target.subsections.1_2_1_business_target.content`
//!
//! # Key Points
//! - Segments are separated by `.`; `subsections` links a node to its children
//! - Resolution checks every hop and reports the first segment that is missing
//! - Empty segments (`a..b`) are kept and never resolve

use std::fmt;

use serde_json::Value;

use super::error::PathError;
use super::section::{sections_to_value, SectionNode, Sections, SUBSECTIONS};

/// Separator between path segments
pub const SEPARATOR: char = '.';

/// A parsed dotted path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    /// Parse a dotted path
    ///
    /// # Examples
    /// ```
    /// use techsol::core::path::DocPath;
    ///
    /// let path = DocPath::parse("6_appendix.content").unwrap();
    /// assert_eq!(path.depth(), 2);
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.trim().is_empty() {
            return Err(PathError::Empty);
        }

        Ok(Self {
            segments: s.split(SEPARATOR).map(str::to_string).collect(),
        })
    }

    /// Build a path from already-split segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Get path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// All but the last segment, or `None` for a single-segment path
    pub fn parent(&self) -> Option<DocPath> {
        if self.segments.len() <= 1 {
            return None;
        }

        Some(DocPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The last segment
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Append one segment
    pub fn child(&self, segment: &str) -> DocPath {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        DocPath { segments }
    }

    /// Walk the tree hop by hop
    pub fn resolve<'a>(&self, root: &'a Sections) -> Result<Target<'a>, PathError> {
        let mut current = Target::Sections(root);

        for (index, segment) in self.segments.iter().enumerate() {
            let next = match current {
                Target::Sections(map) => map.get(segment).map(Target::Node),
                Target::Node(node) if segment == SUBSECTIONS => {
                    node.subsections.as_ref().map(Target::Sections)
                }
                Target::Node(node) => node.field(segment).map(Target::Field),
                Target::Field(_) => None,
            };

            current = next.ok_or_else(|| PathError::NotFound {
                segment: segment.clone(),
                index,
            })?;
        }

        Ok(current)
    }
}

/// What a path resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// A mapping of sibling sections (the root, or some `subsections`)
    Sections(&'a Sections),
    /// A single section
    Node(&'a SectionNode),
    /// A string field of a section
    Field(&'a str),
}

impl Target<'_> {
    /// Deep-convert into a plain JSON value
    pub fn to_value(&self) -> Value {
        match self {
            Target::Sections(map) => sections_to_value(map),
            Target::Node(node) => node.to_value(),
            Target::Field(text) => Value::String((*text).to_string()),
        }
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl TryFrom<&str> for DocPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, PathError> {
        DocPath::parse(s)
    }
}

impl TryFrom<String> for DocPath {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, PathError> {
        DocPath::parse(&s)
    }
}
