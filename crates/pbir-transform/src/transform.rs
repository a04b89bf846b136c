//! The transform contract.
//!
//! A transform is a pure function over one document: it receives the
//! document value, its parameters and a read-only [`TreeSummary`], mutates
//! the value in place and reports whether it changed anything.
//!
//! Every transform must be idempotent: applied to its own output it returns
//! [`Outcome::Unchanged`]. It must leave keys it does not own untouched, and
//! it must not read anything besides its inputs.

use pbir_json::Value;
use pbir_model::{DocumentKind, Scope, TreeSummary};
use thiserror::Error;

use crate::params::Params;

/// Result of applying a transform to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    /// The document was modified; the text describes the change.
    Changed(String),
}

impl Outcome {
    pub fn changed(description: impl Into<String>) -> Self {
        Self::Changed(description.into())
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Unchanged => None,
            Self::Changed(description) => Some(description),
        }
    }
}

/// Everything a transform may read besides the document itself.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// Kind of the document being transformed.
    pub kind: DocumentKind,
    pub params: &'a Params,
    pub summary: &'a TreeSummary,
}

impl<'a> TransformContext<'a> {
    pub fn new(kind: DocumentKind, params: &'a Params, summary: &'a TreeSummary) -> Self {
        Self {
            kind,
            params,
            summary,
        }
    }
}

/// A transform could not be applied to a document.
///
/// The executor treats this as a failure of the action, not of the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("missing required parameter '{name}'")]
    MissingParam { name: String },

    #[error("parameter '{name}' must be {expected}")]
    InvalidParam {
        name: String,
        expected: &'static str,
    },

    #[error("unexpected document content at '{path}': {message}")]
    UnexpectedContent { path: String, message: String },
}

/// A named, idempotent document transformation.
pub trait Transform: Send + Sync {
    /// Registry name of the implementation.
    fn name(&self) -> &'static str;

    /// Fallback description for definitions that do not provide one.
    fn description(&self) -> &'static str;

    /// Documents visited when the definition does not set a scope.
    fn default_scope(&self) -> Scope {
        Scope::All
    }

    /// Apply the transform to one document value.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] when parameters are invalid or the document
    /// holds content the transform cannot handle.
    fn apply(&self, value: &mut Value, ctx: &TransformContext<'_>)
    -> Result<Outcome, TransformError>;
}
