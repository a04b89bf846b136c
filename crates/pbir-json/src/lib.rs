//! Precision-preserving JSON codec for report definition documents.
//!
//! Report documents are consumed by tools that are sensitive to the textual
//! form of numbers (`1.0` and `1` are different files to them). A plain
//! decode/encode cycle would rewrite such literals, so this crate keeps every
//! number literal exactly as written while the document is in memory:
//!
//! - **decode**: parse text, keeping object key order and the source text of
//!   every number literal, plus the layout facts needed to write it back
//!   (byte order mark, line endings, trailing newline, escaped strings).
//! - **encode**: write a value with fixed indentation; untouched literals are
//!   emitted verbatim, numbers created during processing use the standard
//!   shortest round-trip formatting.
//! - **literal**: explicit accessors for transforms that need the numeric
//!   value of a literal, or need to create a new number.
//!
//! # Example
//!
//! ```
//! use pbir_json::{decode, encode};
//!
//! let text = "{\n  \"x\": 12.0,\n  \"y\": 1e3,\n  \"z\": 2.5E-05\n}";
//! let decoded = decode(text).unwrap();
//! assert_eq!(encode(&decoded.value, &decoded.layout).unwrap(), text);
//! ```

use std::collections::BTreeMap;

mod decode;
mod encode;
mod error;
pub mod literal;

pub use decode::{Decoded, decode};
pub use encode::{DEFAULT_INDENT, encode, encode_with_indent};
pub use error::{EncodeError, ParseError};
pub use literal::{is_number, literal_f64, literal_text, number_value, numbers_equal};

/// Re-exported so dependants name one JSON value type.
pub use serde_json::{Map, Value};

/// Textual layout facts of a decoded document.
///
/// Encoding with the layout a document was decoded with reproduces the
/// surrounding bytes of the original file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    /// Source started with a UTF-8 byte order mark.
    pub bom: bool,
    /// Source used `\r\n` line endings.
    pub crlf: bool,
    /// Source ended with a line ending after the closing bracket.
    pub trailing_newline: bool,
    /// Source text of strings written with escapes the standard encoding
    /// would not produce (`"\u0026"`, `"a\/b"`), keyed by decoded content.
    pub spellings: BTreeMap<String, String>,
}
