use pbir_json::{Map, Value};

use super::parent_object_mut;
use crate::transform::{Outcome, Transform, TransformContext, TransformError};

/// Sorts the keys of the object at `params.key` (a dotted path).
#[derive(Debug, Default)]
pub struct SortObjectKeys;

impl Transform for SortObjectKeys {
    fn name(&self) -> &'static str {
        "sort_object_keys"
    }

    fn description(&self) -> &'static str {
        "Sort object keys alphabetically"
    }

    fn apply(
        &self,
        value: &mut Value,
        ctx: &TransformContext<'_>,
    ) -> Result<Outcome, TransformError> {
        let path = ctx.params.str("key")?;
        let Some((parent, key)) = parent_object_mut(value, path) else {
            return Ok(Outcome::Unchanged);
        };
        let Some(Value::Object(target)) = parent.get_mut(key) else {
            return Ok(Outcome::Unchanged);
        };
        if target.keys().is_sorted() {
            return Ok(Outcome::Unchanged);
        }

        let mut entries: Vec<(String, Value)> = std::mem::take(target).into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        *target = entries.into_iter().collect::<Map<String, Value>>();
        Ok(Outcome::changed(format!("sort keys of {path}")))
    }
}
