use pbir_json::Value;
use pbir_model::Scope;

use crate::transform::{Outcome, Transform, TransformContext, TransformError};

const SHOW_ALL: &str = "showAll";

/// Removes every `"showAll": true` flag ("show items with no data") from a
/// visual, at any depth.
#[derive(Debug, Default)]
pub struct DisableShowItemsWithNoData;

impl Transform for DisableShowItemsWithNoData {
    fn name(&self) -> &'static str {
        "disable_show_items_with_no_data"
    }

    fn description(&self) -> &'static str {
        "Disable 'show items with no data'"
    }

    fn default_scope(&self) -> Scope {
        Scope::Visuals
    }

    fn apply(
        &self,
        value: &mut Value,
        _ctx: &TransformContext<'_>,
    ) -> Result<Outcome, TransformError> {
        let removed = strip_show_all(value);
        if removed == 0 {
            return Ok(Outcome::Unchanged);
        }
        Ok(Outcome::changed(format!(
            "disable show items with no data ({removed} field{})",
            if removed == 1 { "" } else { "s" }
        )))
    }
}

fn strip_show_all(value: &mut Value) -> usize {
    match value {
        Value::Object(map) => {
            let mut removed = 0;
            if map.get(SHOW_ALL) == Some(&Value::Bool(true)) {
                map.shift_remove(SHOW_ALL);
                removed += 1;
            }
            for child in map.values_mut() {
                removed += strip_show_all(child);
            }
            removed
        }
        Value::Array(items) => items.iter_mut().map(strip_show_all).sum(),
        _ => 0,
    }
}
