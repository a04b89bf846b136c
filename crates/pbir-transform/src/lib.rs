//! Sanitize transforms and their configuration.
//!
//! This crate provides everything between a configuration file and a list
//! of executable actions:
//!
//! - **transform**: the [`Transform`] contract every action implements
//! - **builtin**: the transforms shipped with the tool
//! - **registry**: name to implementation lookup ([`TransformRegistry`])
//! - **config**: TOML configuration sources and their merge rules
//! - **resolve**: the pure [`resolve`] step producing ordered
//!   [`ActionDefinition`]s
//!
//! # Example
//!
//! ```
//! use pbir_transform::{SanitizeConfig, Selection, TransformRegistry, resolve};
//!
//! let registry = TransformRegistry::builtin();
//! let base = SanitizeConfig::packaged_default().unwrap();
//! let resolved = resolve(base, None, &Selection::default(), &registry).unwrap();
//! assert!(resolved.action_names().contains(&"remove_empty_interactions"));
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod params;
pub mod registry;
pub mod resolve;
pub mod transform;

pub use config::{
    DefinitionConfig, OptionsConfig, PROJECT_CONFIG_FILE, SanitizeConfig, find_project_config,
};
pub use error::ConfigError;
pub use params::Params;
pub use registry::TransformRegistry;
pub use resolve::{ActionDefinition, ResolvedConfig, ResolvedOptions, Selection, resolve};
pub use transform::{Outcome, Transform, TransformContext, TransformError};
