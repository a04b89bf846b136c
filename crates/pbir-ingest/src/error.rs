//! Loader and persistence errors.
//!
//! Every variant names the file or directory it concerns so the caller can
//! report it without extra context.

use std::path::PathBuf;

use pbir_json::{EncodeError, ParseError};
use thiserror::Error;

/// The report tree could not be loaded. No partial tree is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The root document is missing; the path is not a report root.
    #[error("not a report: {path} does not exist")]
    NotAReport { path: PathBuf },

    /// A page or visual is missing, unreadable or has the wrong shape.
    #[error("corrupt report at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// A document is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Path of the offending file or directory.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotAReport { path } | Self::Corrupt { path, .. } | Self::Parse { path, .. } => {
                path
            }
        }
    }
}

/// A changed document could not be written back.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },

    #[error("document {key} is not part of the loaded tree")]
    UnknownDocument { key: String },
}
