//! Name to implementation lookup for transforms.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::builtin::{
    DisableShowItemsWithNoData, HideTooltipPages, RemoveEmptyKey, RemoveUnusedCustomVisuals,
    SetPageSize, SortObjectKeys,
};
use crate::transform::Transform;

/// Registered transform implementations, keyed by [`Transform::name`].
///
/// Populated once at startup and passed explicitly to config resolution.
#[derive(Clone, Default)]
pub struct TransformRegistry {
    transforms: BTreeMap<&'static str, Arc<dyn Transform>>,
}

impl TransformRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in transform.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(RemoveEmptyKey));
        registry.register(Arc::new(DisableShowItemsWithNoData));
        registry.register(Arc::new(HideTooltipPages));
        registry.register(Arc::new(SetPageSize));
        registry.register(Arc::new(RemoveUnusedCustomVisuals));
        registry.register(Arc::new(SortObjectKeys));
        registry
    }

    /// Register an implementation, replacing any with the same name.
    pub fn register(&mut self, transform: Arc<dyn Transform>) -> Option<Arc<dyn Transform>> {
        self.transforms.insert(transform.name(), transform)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Transform>> {
        self.transforms.get(name).cloned()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.transforms.keys().copied().collect()
    }
}

impl std::fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("transforms", &self.names())
            .finish()
    }
}
