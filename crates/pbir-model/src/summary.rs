//! Read-only digest of a tree for transforms that look across documents.

use std::collections::BTreeSet;

use pbir_json::Value;

use crate::tree::ReportTree;

/// Facts about the whole tree, recomputed before every action.
///
/// Transforms only see one document at a time; anything they need to know
/// about the rest of the tree is passed to them through this value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSummary {
    /// Every `visual.visualType` used by a visual document.
    pub visual_types: BTreeSet<String>,
}

impl TreeSummary {
    pub fn from_tree(tree: &ReportTree) -> Self {
        let mut visual_types = BTreeSet::new();
        for page in &tree.pages {
            for visual in &page.visuals {
                if let Some(visual_type) = visual_type(&visual.document.value) {
                    visual_types.insert(visual_type.to_string());
                }
            }
        }
        Self { visual_types }
    }

    pub fn uses_visual_type(&self, visual_type: &str) -> bool {
        self.visual_types.contains(visual_type)
    }
}

/// `visual.visualType` of a visual document.
pub fn visual_type(value: &Value) -> Option<&str> {
    value
        .get("visual")
        .and_then(|visual| visual.get("visualType"))
        .and_then(Value::as_str)
}
