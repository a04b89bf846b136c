use std::path::PathBuf;

use thiserror::Error;

/// Configuration could not be read or resolved into an action list.
///
/// All variants are raised before any document is loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("unknown action '{name}': not found in definitions")]
    UnknownAction { name: String },

    #[error("action '{action}' uses unknown implementation '{implementation}'")]
    UnknownImplementation {
        action: String,
        implementation: String,
    },

    #[error("action '{name}' is listed more than once")]
    DuplicateAction { name: String },
}
