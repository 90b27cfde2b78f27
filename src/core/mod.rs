//! Core module - Document model and logic
//!
//! Contains the section tree, dotted paths, the template, the store and its
//! text renderers.

pub mod error;
pub mod path;
pub mod render;
pub mod section;
pub mod store;
pub mod template;

pub use error::{ParseError, PathError, TemplateError};
pub use store::{DocumentStore, Snapshot, UpdateMode};
pub use template::{Template, TECHNICAL_SOLUTION};
