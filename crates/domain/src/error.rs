//! Configuration errors
//!
//! Tree-shape violations detected at mount time are fatal: the host must
//! refuse to mount the form. Everything that can go wrong after mount
//! (unknown rule types, wrong-shaped values, validation failures) surfaces
//! as diagnostics or structured validation data instead, never as errors.

use thiserror::Error;

use crate::fields::RendererKind;

/// Fatal configuration error detected when a form is mounted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Field names must be unique across the whole tree
    #[error("Duplicate field name in form tree: '{0}'")]
    DuplicateFieldName(String),

    /// The renderer registry has no mapping for a kind the tree uses
    #[error("No renderer registered for field kind '{0}'")]
    MissingRenderer(RendererKind),

    /// A validation pattern failed to compile
    #[error("Invalid validation pattern for field '{field}': {message}")]
    InvalidPattern {
        field: String,
        pattern: String,
        message: String,
    },
}
