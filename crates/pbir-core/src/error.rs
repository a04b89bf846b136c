//! Run errors.

use std::fmt;
use std::path::PathBuf;

use pbir_ingest::{LoadError, PersistError};
use pbir_model::ShapeError;
use pbir_transform::{ConfigError, TransformError};
use thiserror::Error;

use crate::report::{RunReport, RunState};

/// Every way a sanitize invocation can fail.
///
/// Only [`SanitizeError::TransformFailure`] is recovered from: it marks one
/// action as failed and the run continues. Everything else ends the run.
#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("action '{action}' failed on {document}: {source}")]
    TransformFailure {
        action: String,
        document: String,
        #[source]
        source: TransformError,
    },

    #[error("action '{action}' broke the structure of {path}: {reason}")]
    StructuralViolation {
        action: String,
        path: PathBuf,
        reason: ShapeError,
    },

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("{changed} document(s) would change")]
    ChangeGateViolation { changed: usize },

    #[error("expected changes but every document is already sanitized")]
    NothingChanged,
}

impl SanitizeError {
    /// Whether this is a change-gate outcome rather than a processing error.
    pub fn is_gate(&self) -> bool {
        matches!(self, Self::ChangeGateViolation { .. } | Self::NothingChanged)
    }
}

/// A fatal run error together with what was done before it.
///
/// `state` is the state the run was in when the error occurred; the partial
/// report is always in [`RunState::Failed`].
#[derive(Debug)]
pub struct RunFailure {
    pub error: SanitizeError,
    pub state: RunState,
    pub partial: RunReport,
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error.source()
    }
}
