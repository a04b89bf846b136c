//! Text to value.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;
use serde_json::{Map, Number, Value};

use crate::Layout;
use crate::error::ParseError;
use crate::literal::{LITERAL_KEY, preserved};

const BOM: char = '\u{feff}';

/// A decoded document with the layout needed to write it back.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: Value,
    pub layout: Layout,
}

/// Parse JSON text, keeping key order and the exact text of number literals.
///
/// # Errors
///
/// Returns [`ParseError`] with the line and column of the first malformed
/// token, or of an object key that collides with the preservation marker.
pub fn decode(text: &str) -> Result<Decoded, ParseError> {
    let bom = text.starts_with(BOM);
    let body = text.strip_prefix(BOM).unwrap_or(text);

    // Validates the whole text; everything below works on known-good slices.
    let root: &RawValue = serde_json::from_str(body)?;
    let mut reader = Reader {
        source: body,
        strings: BTreeMap::new(),
    };
    let value = reader.value(root)?;

    let layout = Layout {
        bom,
        crlf: body.contains("\r\n"),
        trailing_newline: body.ends_with('\n'),
        spellings: reader.spellings(),
    };
    Ok(Decoded { value, layout })
}

/// Walks a validated document one raw token at a time.
struct Reader<'a> {
    source: &'a str,
    /// Source spelling of every string and key, `None` once two spellings of
    /// the same content disagree.
    strings: BTreeMap<String, Option<&'a str>>,
}

impl<'a> Reader<'a> {
    fn value(&mut self, raw: &'a RawValue) -> Result<Value, ParseError> {
        let text = raw.get();
        match text.as_bytes().first() {
            Some(b'{') => self.object(text),
            Some(b'[') => {
                let raw_items: Vec<&'a RawValue> = serde_json::from_str(text)?;
                let mut items = Vec::with_capacity(raw_items.len());
                for item in raw_items {
                    items.push(self.value(item)?);
                }
                Ok(Value::Array(items))
            }
            Some(b'"') => self.string(text).map(Value::String),
            Some(b'-' | b'0'..=b'9') => Ok(number(text)),
            _ => Ok(serde_json::from_str(text)?),
        }
    }

    fn object(&mut self, text: &'a str) -> Result<Value, ParseError> {
        let Entries(entries) = serde_json::from_str(text)?;
        let mut map = Map::with_capacity(entries.len());
        for (key, value) in entries {
            let name = self.string(key.get())?;
            if name == LITERAL_KEY {
                return Err(self.reserved_key(key.get()));
            }
            let value = self.value(value)?;
            map.insert(name, value);
        }
        Ok(Value::Object(map))
    }

    fn string(&mut self, raw: &'a str) -> Result<String, ParseError> {
        let content: String = serde_json::from_str(raw)?;
        self.strings
            .entry(content.clone())
            .and_modify(|spelling| {
                if *spelling != Some(raw) {
                    *spelling = None;
                }
            })
            .or_insert(Some(raw));
        Ok(content)
    }

    /// Strings whose only source spelling differs from the standard escaping.
    fn spellings(self) -> BTreeMap<String, String> {
        self.strings
            .into_iter()
            .filter_map(|(content, spelling)| {
                let raw = spelling?;
                let standard = serde_json::to_string(&content).ok()?;
                (standard != raw).then(|| (content, raw.to_string()))
            })
            .collect()
    }

    fn reserved_key(&self, token: &str) -> ParseError {
        let offset = (token.as_ptr() as usize).saturating_sub(self.source.as_ptr() as usize);
        let before = self.source.get(..offset).unwrap_or(self.source);
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().map_or(0, |tail| tail.chars().count()) + 1;
        ParseError {
            line,
            column,
            message: format!("reserved key `{LITERAL_KEY}`"),
        }
    }
}

/// Integers that encode back to the same text stay plain numbers. Every
/// other literal is wrapped with its source text.
fn number(text: &str) -> Value {
    if !text.contains(['.', 'e', 'E']) {
        let integer = text
            .parse::<i64>()
            .map(Number::from)
            .or_else(|_| text.parse::<u64>().map(Number::from));
        if let Ok(number) = integer
            && number.to_string() == text
        {
            return Value::Number(number);
        }
    }
    preserved(text)
}

/// Object members as raw key and value tokens, in source order.
struct Entries<'a>(Vec<(&'a RawValue, &'a RawValue)>);

impl<'de> Deserialize<'de> for Entries<'de> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries<'de>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<&'de RawValue, &'de RawValue>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_key_order() {
        let decoded = decode(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = decoded
            .value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn plain_integers_stay_numbers() {
        let decoded = decode(r#"{"a": 7, "b": -12, "c": 18446744073709551615}"#).unwrap();
        assert_eq!(decoded.value["a"], Value::from(7));
        assert_eq!(decoded.value["b"], Value::from(-12));
        assert_eq!(decoded.value["c"], Value::from(u64::MAX));
    }

    #[test]
    fn records_layout() {
        let decoded = decode("\u{feff}{\r\n  \"a\": 1\r\n}\r\n").unwrap();
        assert!(decoded.layout.bom);
        assert!(decoded.layout.crlf);
        assert!(decoded.layout.trailing_newline);

        let plain = decode("{}").unwrap();
        assert_eq!(plain.layout, Layout::default());
    }

    #[test]
    fn records_escaped_spellings() {
        let decoded = decode(r#"{"url": "a\/b", "amp": "\u0026", "plain": "x"}"#).unwrap();
        assert_eq!(decoded.value["url"], "a/b");
        assert_eq!(decoded.value["amp"], "&");
        let spellings = &decoded.layout.spellings;
        assert_eq!(spellings.get("a/b").map(String::as_str), Some(r#""a\/b""#));
        assert_eq!(spellings.get("&").map(String::as_str), Some(r#""\u0026""#));
        assert!(!spellings.contains_key("x"));
        assert!(!spellings.contains_key("plain"));
    }

    #[test]
    fn conflicting_spellings_are_dropped() {
        let decoded = decode(r#"["\u0026", "&"]"#).unwrap();
        assert!(decoded.layout.spellings.is_empty());
    }

    #[test]
    fn reports_location_of_malformed_text() {
        let err = decode("{\n  \"a\": 1,\n  \"b\": ]\n}").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.column > 0);
        assert!(!err.message.contains("at line"));
    }

    #[test]
    fn rejects_the_marker_key() {
        let err = decode("{\n  \"a\": {\n    \"$pbir_json::literal\": \"1\"\n  }\n}").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.column, 5);
        assert!(err.message.contains("reserved key"));
    }
}
