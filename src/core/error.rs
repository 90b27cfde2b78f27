//! Error types for the document core

use thiserror::Error;

/// Input-shape violations for the two document operations.
///
/// Raised before the store is touched, so the current snapshot is always
/// unchanged when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The parameter bundle was not a JSON object.
    #[error("[ParseError] {0}: input params must be an object")]
    NotAnObject(&'static str),

    /// `sectionPath` was present but neither a string nor null.
    #[error("[ParseError] query: \"sectionPath\" must be a string or null")]
    InvalidSectionPath,

    /// `path` missing, not a string, or blank.
    #[error("[ParseError] update: \"path\" is required and must be a non-empty string")]
    MissingPath,

    /// `content` absent from the input.
    #[error("[ParseError] update: \"content\" is required")]
    MissingContent,

    /// `mode` was given but is not one of the two known modes.
    #[error("[ParseError] update: \"mode\" must be \"overwrite\" or \"append\", got {0}")]
    InvalidMode(String),

    /// `format` was given but is not a known render format.
    #[error("[ParseError] render: \"format\" must be \"outline\" or \"markdown\", got {0}")]
    InvalidFormat(String),
}

/// A dotted path that failed to resolve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path cannot be empty")]
    Empty,

    #[error("segment \"{segment}\" (#{index}) not found")]
    NotFound { segment: String, index: usize },
}

/// Failures while loading or checking a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML template: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON template: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported template format \"{0}\" (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("invalid template at \"{path}\": {reason}")]
    Invalid { path: String, reason: String },
}
