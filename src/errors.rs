//! Error types with rich diagnostics using miette
//!
//! Geometry never fails: degenerate input produces best-effort output or
//! `None`. Errors only surface where caller data enters the crate, namely
//! edge resolution against the node set and style property parsing.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Model Errors
// ============================================================================

/// Errors raised while resolving an edge against its nodes
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum EdgeError {
    #[error("edge `{edge}` references unknown node `{node}`")]
    #[diagnostic(
        code(g6::model::unknown_node),
        help("add node `{node}` before rendering edges that point at it")
    )]
    UnknownNode { edge: String, node: String },

    #[error("node `{node}` has non-finite geometry")]
    #[diagnostic(
        code(g6::model::invalid_geometry),
        help("node position and size must be finite numbers")
    )]
    InvalidGeometry { node: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Style(#[from] StyleError),
}

// ============================================================================
// Style Errors
// ============================================================================

/// Errors raised while parsing flat style properties
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("unknown style property `{key}`")]
    #[diagnostic(
        code(g6::style::unknown_property),
        help("sub-shape properties are prefixed: label*, halo*, startArrow*, endArrow*, loop*")
    )]
    UnknownProperty { key: String },

    #[error("style property `{key}` expects {expected}, got {got}")]
    #[diagnostic(code(g6::style::type_mismatch))]
    TypeMismatch {
        key: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("invalid value `{value}` for `{key}`, expected {expected}")]
    #[diagnostic(code(g6::style::invalid_keyword))]
    InvalidKeyword {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// A keyword that did not match any variant of a keyword enum.
///
/// Returned by the `FromStr` impls of style keywords; the style parser
/// attaches the property name and turns it into [`StyleError::InvalidKeyword`].
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid keyword `{value}`, expected {expected}")]
pub struct KeywordError {
    pub value: String,
    pub expected: &'static str,
}

impl KeywordError {
    pub fn new(value: impl Into<String>, expected: &'static str) -> Self {
        Self {
            value: value.into(),
            expected,
        }
    }

    pub(crate) fn with_key(self, key: &str) -> StyleError {
        StyleError::InvalidKeyword {
            key: key.to_string(),
            value: self.value,
            expected: self.expected,
        }
    }
}
