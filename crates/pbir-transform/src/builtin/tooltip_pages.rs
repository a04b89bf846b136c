use pbir_json::Value;
use pbir_model::Scope;

use crate::transform::{Outcome, Transform, TransformContext, TransformError};

const HIDDEN: &str = "HiddenInViewMode";

/// Hides tooltip pages (and optionally drillthrough pages) in view mode.
///
/// The page kind is read from `pageBinding.type`, falling back to a
/// top-level `type`.
#[derive(Debug, Default)]
pub struct HideTooltipPages;

impl Transform for HideTooltipPages {
    fn name(&self) -> &'static str {
        "hide_tooltip_pages"
    }

    fn description(&self) -> &'static str {
        "Hide tooltip pages"
    }

    fn default_scope(&self) -> Scope {
        Scope::Pages
    }

    fn apply(
        &self,
        value: &mut Value,
        ctx: &TransformContext<'_>,
    ) -> Result<Outcome, TransformError> {
        let include_drillthrough = ctx.params.bool_or("include_drillthrough", false)?;
        let page_type = value
            .get("pageBinding")
            .and_then(|binding| binding.get("type"))
            .or_else(|| value.get("type"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let label = match page_type.as_deref() {
            Some("Tooltip") => "tooltip",
            Some("Drillthrough") if include_drillthrough => "drillthrough",
            _ => return Ok(Outcome::Unchanged),
        };

        if value.get("visibility").and_then(Value::as_str) == Some(HIDDEN) {
            return Ok(Outcome::Unchanged);
        }
        let Some(page) = value.as_object_mut() else {
            return Ok(Outcome::Unchanged);
        };
        page.insert("visibility".to_string(), Value::String(HIDDEN.to_string()));
        Ok(Outcome::changed(format!("hide {label} page")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use pbir_model::{DocumentKind, TreeSummary};
    use serde_json::json;

    fn run(value: &mut Value, params: &Params) -> Outcome {
        let summary = TreeSummary::default();
        let ctx = TransformContext::new(DocumentKind::Page, params, &summary);
        HideTooltipPages.apply(value, &ctx).unwrap()
    }

    #[test]
    fn hides_tooltip_page_once() {
        let mut value = json!({"name": "p1", "pageBinding": {"type": "Tooltip"}});
        assert_eq!(run(&mut value, &Params::new()), Outcome::changed("hide tooltip page"));
        assert_eq!(value["visibility"], json!("HiddenInViewMode"));
        assert_eq!(run(&mut value, &Params::new()), Outcome::Unchanged);
    }

    #[test]
    fn leaves_regular_pages() {
        let mut value = json!({"name": "p1", "displayName": "Overview"});
        assert_eq!(run(&mut value, &Params::new()), Outcome::Unchanged);
        assert!(value.get("visibility").is_none());
    }

    #[test]
    fn drillthrough_is_opt_in() {
        let mut value = json!({"name": "p1", "type": "Drillthrough"});
        assert_eq!(run(&mut value, &Params::new()), Outcome::Unchanged);

        let params = Params::new().with("include_drillthrough", true);
        assert_eq!(run(&mut value, &params), Outcome::changed("hide drillthrough page"));
    }
}
