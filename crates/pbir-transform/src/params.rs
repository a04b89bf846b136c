//! Action parameters.

use pbir_json::{Map, Value, literal_f64};
use serde::Deserialize;

use crate::transform::TransformError;

/// Parameter set of one action: a JSON object merged from configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Merge `other` over `self` key by key.
    pub fn merge(&mut self, other: Params) {
        for (name, value) in other.0 {
            self.0.insert(name, value);
        }
    }

    /// A required string parameter.
    pub fn str(&self, name: &str) -> Result<&str, TransformError> {
        match self.0.get(name) {
            None => Err(TransformError::MissingParam {
                name: name.to_string(),
            }),
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(invalid(name, "a string")),
        }
    }

    /// An optional boolean parameter.
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, TransformError> {
        match self.0.get(name) {
            None => Ok(default),
            Some(Value::Bool(value)) => Ok(*value),
            Some(_) => Err(invalid(name, "a boolean")),
        }
    }

    /// A required numeric parameter, returned as the JSON number itself so
    /// it can be written into a document unchanged.
    pub fn number(&self, name: &str) -> Result<&Value, TransformError> {
        match self.0.get(name) {
            None => Err(TransformError::MissingParam {
                name: name.to_string(),
            }),
            Some(value) if literal_f64(value).is_some() => Ok(value),
            Some(_) => Err(invalid(name, "a number")),
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn invalid(name: &str, expected: &'static str) -> TransformError {
    TransformError::InvalidParam {
        name: name.to_string(),
        expected,
    }
}
