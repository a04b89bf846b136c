use pbir_json::Value;
use pbir_model::Scope;

use crate::transform::{Outcome, Transform, TransformContext, TransformError};

const CUSTOM_VISUALS: &str = "publicCustomVisuals";

/// Drops entries of the report's `publicCustomVisuals` list that no visual in
/// the tree uses, and the key itself once the list is empty.
#[derive(Debug, Default)]
pub struct RemoveUnusedCustomVisuals;

impl Transform for RemoveUnusedCustomVisuals {
    fn name(&self) -> &'static str {
        "remove_unused_custom_visuals"
    }

    fn description(&self) -> &'static str {
        "Remove unused custom visuals"
    }

    fn default_scope(&self) -> Scope {
        Scope::Report
    }

    fn apply(
        &self,
        value: &mut Value,
        ctx: &TransformContext<'_>,
    ) -> Result<Outcome, TransformError> {
        let Some(report) = value.as_object_mut() else {
            return Ok(Outcome::Unchanged);
        };
        let Some(entry) = report.get_mut(CUSTOM_VISUALS) else {
            return Ok(Outcome::Unchanged);
        };
        let Some(visuals) = entry.as_array_mut() else {
            return Err(TransformError::UnexpectedContent {
                path: CUSTOM_VISUALS.to_string(),
                message: "expected a list of visual names".to_string(),
            });
        };

        let mut removed = Vec::new();
        visuals.retain(|visual| match visual.as_str() {
            Some(name) if !ctx.summary.uses_visual_type(name) => {
                removed.push(name.to_string());
                false
            }
            _ => true,
        });
        let now_empty = visuals.is_empty();
        if now_empty {
            report.shift_remove(CUSTOM_VISUALS);
        }

        if removed.is_empty() {
            return Ok(if now_empty {
                Outcome::changed(format!("remove empty {CUSTOM_VISUALS}"))
            } else {
                Outcome::Unchanged
            });
        }
        Ok(Outcome::changed(format!(
            "remove unused custom visuals: {}",
            removed.join(", ")
        )))
    }
}
