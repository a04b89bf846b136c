//! Codec error types.

use thiserror::Error;

/// Malformed JSON text.
#[derive(Debug, Error)]
#[error("invalid JSON at line {line}, column {column}: {message}")]
pub struct ParseError {
    /// 1-based line of the offending token.
    pub line: usize,
    /// 1-based column of the offending token.
    pub column: usize,
    /// Parser message without the location suffix.
    pub message: String,
}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        let rendered = error.to_string();
        // serde_json appends " at line L column C"; the location is kept separately.
        let message = match rendered.rfind(" at line ") {
            Some(idx) => rendered[..idx].to_string(),
            None => rendered,
        };
        Self {
            line: error.line(),
            column: error.column(),
            message,
        }
    }
}

/// Failure while writing a value back to text.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
