//! Value to text.

use serde_json::Value;

use crate::Layout;
use crate::error::EncodeError;
use crate::literal::preserved_text;

/// Indentation used by report documents.
pub const DEFAULT_INDENT: usize = 2;

/// Serialize a value with the default indentation and the given layout.
///
/// Number literals that came from [`decode`](crate::decode) are written with
/// their original text.
///
/// # Errors
///
/// Returns [`EncodeError`] if a string cannot be serialized.
pub fn encode(value: &Value, layout: &Layout) -> Result<String, EncodeError> {
    encode_with_indent(value, layout, DEFAULT_INDENT)
}

/// Serialize a value with an explicit number of indentation spaces.
///
/// # Errors
///
/// Returns [`EncodeError`] if a string cannot be serialized.
pub fn encode_with_indent(
    value: &Value,
    layout: &Layout,
    indent: usize,
) -> Result<String, EncodeError> {
    let mut writer = Writer {
        out: String::with_capacity(256),
        indent: " ".repeat(indent),
        layout,
    };
    writer.value(value, 0)?;

    let mut text = writer.out;
    if layout.trailing_newline {
        text.push('\n');
    }
    // JSON strings cannot contain raw newlines, so every '\n' is layout.
    if layout.crlf {
        text = text.replace('\n', "\r\n");
    }
    if layout.bom {
        text.insert(0, '\u{feff}');
    }
    Ok(text)
}

/// Pretty printer with `": "` separators and inline empty containers.
struct Writer<'a> {
    out: String,
    indent: String,
    layout: &'a Layout,
}

impl Writer<'_> {
    fn value(&mut self, value: &Value, depth: usize) -> Result<(), EncodeError> {
        if let Some(text) = preserved_text(value) {
            self.out.push_str(text);
            return Ok(());
        }
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(flag) => self.out.push_str(if *flag { "true" } else { "false" }),
            Value::Number(number) => self.out.push_str(&number.to_string()),
            Value::String(content) => self.string(content)?,
            Value::Array(items) if items.is_empty() => self.out.push_str("[]"),
            Value::Array(items) => {
                self.out.push('[');
                for (index, item) in items.iter().enumerate() {
                    self.separator(index, depth + 1);
                    self.value(item, depth + 1)?;
                }
                self.close(depth, ']');
            }
            Value::Object(map) if map.is_empty() => self.out.push_str("{}"),
            Value::Object(map) => {
                self.out.push('{');
                for (index, (key, item)) in map.iter().enumerate() {
                    self.separator(index, depth + 1);
                    self.string(key)?;
                    self.out.push_str(": ");
                    self.value(item, depth + 1)?;
                }
                self.close(depth, '}');
            }
        }
        Ok(())
    }

    fn string(&mut self, content: &str) -> Result<(), EncodeError> {
        match self.layout.spellings.get(content) {
            Some(raw) => self.out.push_str(raw),
            None => self.out.push_str(&serde_json::to_string(content)?),
        }
        Ok(())
    }

    fn separator(&mut self, index: usize, depth: usize) {
        if index > 0 {
            self.out.push(',');
        }
        self.newline(depth);
    }

    fn close(&mut self, depth: usize, bracket: char) {
        self.newline(depth);
        self.out.push(bracket);
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        for _ in 0..depth {
            self.out.push_str(&self.indent);
        }
    }
}
