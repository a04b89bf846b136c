//! Sanitize configuration files.
//!
//! A configuration has three sections:
//!
//! ```toml
//! actions = ["remove_empty_interactions"]   # ordered list to run
//!
//! [options]
//! dry_run = false
//!
//! [definitions.remove_empty_interactions]
//! description = "Remove empty visual interaction lists"
//! implementation = "remove_empty_key"       # defaults to the action name
//! scope = "all"                             # defaults to the transform's scope
//!
//! [definitions.remove_empty_interactions.params]
//! key = "visualInteractions"
//! ```
//!
//! The packaged default is embedded in the crate; a project file is layered
//! over it with [`SanitizeConfig::merged`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pbir_model::Scope;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::params::Params;

/// File name looked up for project configuration.
pub const PROJECT_CONFIG_FILE: &str = "pbir-sanitize.toml";

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// One configuration source, before merging.
///
/// Every field is optional so an override can state only what it changes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SanitizeConfig {
    /// Ordered action names. `None` means "keep the base ordering".
    #[serde(default)]
    pub actions: Option<Vec<String>>,
    #[serde(default)]
    pub definitions: BTreeMap<String, DefinitionConfig>,
    #[serde(default)]
    pub options: OptionsConfig,
}

/// Definition of one named action.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionConfig {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub implementation: Option<String>,
    #[serde(default)]
    pub scope: Option<Scope>,
    #[serde(default)]
    pub params: Params,
}

/// Global run flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    #[serde(default)]
    pub dry_run: Option<bool>,
    #[serde(default)]
    pub summary: Option<bool>,
    #[serde(default)]
    pub fail_on_change: Option<bool>,
}

impl SanitizeConfig {
    /// The packaged default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the embedded file is invalid.
    pub fn packaged_default() -> Result<Self, ConfigError> {
        Self::from_toml_str(DEFAULT_CONFIG, "<packaged default>")
    }

    /// Parse configuration text. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML or unknown fields.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Layer `overlay` over `self`.
    ///
    /// - `actions`: replaced wholesale when the overlay has a list.
    /// - `definitions`: merged per action; scalar fields replace, `params`
    ///   merge key by key; new definitions are added.
    /// - `options`: replaced field by field.
    #[must_use]
    pub fn merged(mut self, overlay: SanitizeConfig) -> Self {
        if overlay.actions.is_some() {
            self.actions = overlay.actions;
        }
        for (name, incoming) in overlay.definitions {
            let entry = self.definitions.entry(name).or_default();
            if incoming.description.is_some() {
                entry.description = incoming.description;
            }
            if incoming.implementation.is_some() {
                entry.implementation = incoming.implementation;
            }
            if incoming.scope.is_some() {
                entry.scope = incoming.scope;
            }
            entry.params.merge(incoming.params);
        }
        self.options = OptionsConfig {
            dry_run: overlay.options.dry_run.or(self.options.dry_run),
            summary: overlay.options.summary.or(self.options.summary),
            fail_on_change: overlay.options.fail_on_change.or(self.options.fail_on_change),
        };
        self
    }
}

/// Find a project configuration file in `start` or one of its ancestors.
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbir_json::Value;

    #[test]
    fn packaged_default_parses() {
        let config = SanitizeConfig::packaged_default().unwrap();
        let actions = config.actions.unwrap();
        assert_eq!(actions.first().map(String::as_str), Some("disable_show_items_with_no_data"));
        assert!(config.definitions.contains_key("set_page_size"));
        assert_eq!(config.options.dry_run, Some(false));
    }

    #[test]
    fn overlay_merges_params_key_by_key() {
        let base = SanitizeConfig::from_toml_str(
            r#"
actions = ["set_page_size"]

[definitions.set_page_size]
description = "Normalize page dimensions"

[definitions.set_page_size.params]
width = 1280
height = 720
"#,
            "base",
        )
        .unwrap();
        let overlay = SanitizeConfig::from_toml_str(
            r#"
[definitions.set_page_size.params]
height = 1080
"#,
            "overlay",
        )
        .unwrap();

        let merged = base.merged(overlay);

        assert_eq!(merged.actions, Some(vec!["set_page_size".to_string()]));
        let definition = &merged.definitions["set_page_size"];
        assert_eq!(definition.description.as_deref(), Some("Normalize page dimensions"));
        assert_eq!(definition.params.get("width"), Some(&Value::from(1280)));
        assert_eq!(definition.params.get("height"), Some(&Value::from(1080)));
    }

    #[test]
    fn overlay_actions_replace_ordering() {
        let base = SanitizeConfig::from_toml_str(r#"actions = ["a", "b", "c"]"#, "base").unwrap();
        let overlay = SanitizeConfig::from_toml_str(r#"actions = ["c"]"#, "overlay").unwrap();
        assert_eq!(base.merged(overlay).actions, Some(vec!["c".to_string()]));
    }

    #[test]
    fn overlay_options_replace_per_field() {
        let base = SanitizeConfig::from_toml_str(
            "[options]\ndry_run = false\nsummary = true\n",
            "base",
        )
        .unwrap();
        let overlay =
            SanitizeConfig::from_toml_str("[options]\ndry_run = true\n", "overlay").unwrap();
        let merged = base.merged(overlay);
        assert_eq!(merged.options.dry_run, Some(true));
        assert_eq!(merged.options.summary, Some(true));
        assert_eq!(merged.options.fail_on_change, None);
    }

    #[test]
    fn rejects_unknown_fields_and_scopes() {
        assert!(matches!(
            SanitizeConfig::from_toml_str("acitons = []", "typo"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(
            SanitizeConfig::from_toml_str("[definitions.x]\nscope = \"bookmarks\"\n", "scope")
                .is_err()
        );
    }

    #[test]
    fn finds_project_config_in_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Sales.Report");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_project_config(&nested), None);

        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();
        assert_eq!(
            find_project_config(&nested),
            Some(dir.path().join(PROJECT_CONFIG_FILE))
        );
    }
}
