use pbir_json::{Value, literal_text, numbers_equal};
use pbir_model::Scope;

use crate::transform::{Outcome, Transform, TransformContext, TransformError};

/// Sets page `width` and `height` to the configured values.
///
/// A dimension that already holds the target value numerically keeps its
/// literal, so `1280.0` is not rewritten to `1280`.
#[derive(Debug, Default)]
pub struct SetPageSize;

impl Transform for SetPageSize {
    fn name(&self) -> &'static str {
        "set_page_size"
    }

    fn description(&self) -> &'static str {
        "Set page dimensions"
    }

    fn default_scope(&self) -> Scope {
        Scope::Pages
    }

    fn apply(
        &self,
        value: &mut Value,
        ctx: &TransformContext<'_>,
    ) -> Result<Outcome, TransformError> {
        let width = ctx.params.number("width")?;
        let height = ctx.params.number("height")?;
        let Some(page) = value.as_object_mut() else {
            return Ok(Outcome::Unchanged);
        };

        let mut changed = false;
        for (field, target) in [("width", width), ("height", height)] {
            if page.get(field).is_some_and(|current| numbers_equal(current, target)) {
                continue;
            }
            page.insert(field.to_string(), target.clone());
            changed = true;
        }

        if !changed {
            return Ok(Outcome::Unchanged);
        }
        Ok(Outcome::changed(format!(
            "set page size to {}x{}",
            literal_text(width).unwrap_or_default(),
            literal_text(height).unwrap_or_default()
        )))
    }
}
