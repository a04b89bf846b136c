//! Resolution of configuration into an ordered, bound action list.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use pbir_model::Scope;
use tracing::debug;

use crate::config::SanitizeConfig;
use crate::error::ConfigError;
use crate::params::Params;
use crate::registry::TransformRegistry;
use crate::transform::Transform;

/// One configured action, bound to its implementation. Immutable once built.
#[derive(Clone)]
pub struct ActionDefinition {
    pub name: String,
    pub description: String,
    pub implementation: String,
    pub scope: Scope,
    pub params: Params,
    pub transform: Arc<dyn Transform>,
}

impl fmt::Debug for ActionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("implementation", &self.implementation)
            .field("scope", &self.scope)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Caller adjustments to the configured ordering, applied after merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Run exactly these actions, in this order, instead of the configured list.
    pub only: Option<Vec<String>>,
    /// Actions appended to the ordering when not already present.
    pub include: Vec<String>,
    /// Actions removed from the ordering.
    pub exclude: Vec<String>,
}

/// Global flags after merging; unset flags default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub dry_run: bool,
    pub summary: bool,
    pub fail_on_change: bool,
}

/// Ordered actions ready to execute plus the merged options.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub actions: Vec<ActionDefinition>,
    pub options: ResolvedOptions,
}

impl ResolvedConfig {
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(|action| action.name.as_str()).collect()
    }
}

/// Merge `overlay` over `base`, apply `selection`, and bind every action to
/// an implementation from `registry`.
///
/// Pure: the same inputs always resolve to the same configuration, and
/// nothing outside the arguments is consulted.
///
/// # Errors
///
/// - [`ConfigError::UnknownAction`] for a selected, included or excluded
///   name that has no definition.
/// - [`ConfigError::DuplicateAction`] when the ordering repeats a name.
/// - [`ConfigError::UnknownImplementation`] when a definition references an
///   implementation that is not registered.
pub fn resolve(
    base: SanitizeConfig,
    overlay: Option<SanitizeConfig>,
    selection: &Selection,
    registry: &TransformRegistry,
) -> Result<ResolvedConfig, ConfigError> {
    let config = match overlay {
        Some(overlay) => base.merged(overlay),
        None => base,
    };

    let known = |name: &str| -> Result<(), ConfigError> {
        if config.definitions.contains_key(name) {
            Ok(())
        } else {
            Err(ConfigError::UnknownAction {
                name: name.to_string(),
            })
        }
    };

    let mut ordering = match &selection.only {
        Some(only) => only.clone(),
        None => config.actions.clone().unwrap_or_default(),
    };
    for name in &selection.include {
        known(name)?;
        if !ordering.contains(name) {
            ordering.push(name.clone());
        }
    }
    for name in &selection.exclude {
        known(name)?;
    }
    ordering.retain(|name| !selection.exclude.contains(name));

    let mut seen = BTreeSet::new();
    let mut actions = Vec::with_capacity(ordering.len());
    for name in ordering {
        if !seen.insert(name.clone()) {
            return Err(ConfigError::DuplicateAction { name });
        }
        let Some(definition) = config.definitions.get(&name) else {
            return Err(ConfigError::UnknownAction { name });
        };

        let implementation = definition
            .implementation
            .clone()
            .unwrap_or_else(|| name.clone());
        let Some(transform) = registry.get(&implementation) else {
            return Err(ConfigError::UnknownImplementation {
                action: name,
                implementation,
            });
        };

        let action = ActionDefinition {
            description: definition
                .description
                .clone()
                .unwrap_or_else(|| transform.description().to_string()),
            scope: definition.scope.unwrap_or_else(|| transform.default_scope()),
            params: definition.params.clone(),
            name,
            implementation,
            transform,
        };
        debug!(
            action = %action.name,
            implementation = %action.implementation,
            scope = %action.scope,
            "action resolved"
        );
        actions.push(action);
    }

    let options = ResolvedOptions {
        dry_run: config.options.dry_run.unwrap_or(false),
        summary: config.options.summary.unwrap_or(false),
        fail_on_change: config.options.fail_on_change.unwrap_or(false),
    };

    Ok(ResolvedConfig { actions, options })
}
