//! Built-in transforms.

mod custom_visuals;
mod empty_key;
mod page_size;
mod show_items;
mod sort_keys;
mod tooltip_pages;

pub use custom_visuals::RemoveUnusedCustomVisuals;
pub use empty_key::RemoveEmptyKey;
pub use page_size::SetPageSize;
pub use show_items::DisableShowItemsWithNoData;
pub use sort_keys::SortObjectKeys;
pub use tooltip_pages::HideTooltipPages;

use pbir_json::{Map, Value};

/// Object that holds the last segment of a dotted key path, plus that segment.
///
/// `"visual.objects"` resolves to the `visual` object and `"objects"`.
/// Returns `None` when an intermediate segment is missing or not an object.
pub(crate) fn parent_object_mut<'v, 'k>(
    value: &'v mut Value,
    path: &'k str,
) -> Option<(&'v mut Map<String, Value>, &'k str)> {
    let mut segments: Vec<&str> = path.split('.').collect();
    let last = segments.pop()?;
    let mut current = value;
    for segment in segments {
        current = current.get_mut(segment)?;
    }
    current.as_object_mut().map(|object| (object, last))
}

/// Empty array, empty object or null.
pub(crate) fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
