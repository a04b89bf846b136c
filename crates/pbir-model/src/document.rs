//! A single JSON document and its origin.

use std::fmt;
use std::path::PathBuf;

use pbir_json::{Layout, Value, is_number};
use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

/// Position of a document in the report tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// `definition/report.json`.
    Report,
    /// `definition/pages/<page>/page.json`.
    Page,
    /// `definition/pages/<page>/visuals/<visual>/visual.json`.
    Visual,
}

impl DocumentKind {
    /// File name of documents of this kind.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Report => "report.json",
            Self::Page => "page.json",
            Self::Visual => "visual.json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Page => "page",
            Self::Visual => "visual",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded JSON document.
///
/// The `name` a page or visual carried at load time is remembered so that a
/// transform cannot silently detach a document from its directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: DocumentKind,
    /// Location the document was read from and will be written back to.
    pub path: PathBuf,
    pub value: Value,
    pub layout: Layout,
    loaded_name: Option<String>,
}

impl Document {
    pub fn new(kind: DocumentKind, path: impl Into<PathBuf>, value: Value, layout: Layout) -> Self {
        let loaded_name = name_of(&value);
        Self {
            kind,
            path: path.into(),
            value,
            layout,
            loaded_name,
        }
    }

    /// The `name` field as loaded.
    pub fn loaded_name(&self) -> Option<&str> {
        self.loaded_name.as_deref()
    }

    /// Check that `value` is still a valid document for this position.
    pub fn check_shape(&self, value: &Value) -> Result<(), ShapeError> {
        if !is_document_object(value) {
            return Err(ShapeError::NotAnObject {
                found: value_type_name(value),
            });
        }
        if self.kind != DocumentKind::Report {
            let current = name_of(value);
            if current != self.loaded_name {
                return Err(ShapeError::NameChanged {
                    before: self.loaded_name.clone(),
                    after: current,
                });
            }
        }
        Ok(())
    }
}

fn name_of(value: &Value) -> Option<String> {
    value.get("name").and_then(Value::as_str).map(str::to_string)
}

/// A JSON object that is not a wrapped number literal.
pub fn is_document_object(value: &Value) -> bool {
    value.is_object() && !is_number(value)
}

/// JSON type name for messages.
pub fn value_type_name(value: &Value) -> &'static str {
    if is_number(value) {
        return "number";
    }
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
