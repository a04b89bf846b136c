use pbir_json::Value;

use super::{is_empty_container, parent_object_mut};
use crate::transform::{Outcome, Transform, TransformContext, TransformError};

/// Removes `params.key` (a dotted path) when it holds an empty array, an
/// empty object or null.
///
/// Registered once and reused by several configured actions, each naming a
/// different key.
#[derive(Debug, Default)]
pub struct RemoveEmptyKey;

impl Transform for RemoveEmptyKey {
    fn name(&self) -> &'static str {
        "remove_empty_key"
    }

    fn description(&self) -> &'static str {
        "Remove a key whose value is empty"
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
        if !parent.get(key).is_some_and(is_empty_container) {
            return Ok(Outcome::Unchanged);
        }
        parent.shift_remove(key);
        Ok(Outcome::changed(format!("remove empty {path}")))
    }
}
