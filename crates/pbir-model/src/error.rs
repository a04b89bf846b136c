use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown scope '{0}' (expected one of: all, report, pages, visuals)")]
    InvalidScope(String),
}

/// A document no longer has the structure its position in the tree requires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("top-level value must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("structural key 'name' changed from {before:?} to {after:?}")]
    NameChanged {
        before: Option<String>,
        after: Option<String>,
    },
}
