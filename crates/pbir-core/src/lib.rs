//! Sanitize pipeline executor.
//!
//! Takes resolved actions from `pbir-transform` and a report root, runs the
//! actions in order over the loaded tree and reports what changed. Changed
//! documents are written back unless the run is a dry run.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use pbir_core::{RunOptions, run};
//! use pbir_transform::{SanitizeConfig, Selection, TransformRegistry, resolve};
//!
//! let resolved = resolve(
//!     SanitizeConfig::packaged_default()?,
//!     None,
//!     &Selection::default(),
//!     &TransformRegistry::builtin(),
//! )?;
//! let options = RunOptions { dry_run: true, ..RunOptions::default() };
//! let report = run(Path::new("Sales.Report"), &resolved.actions, options)?;
//! println!("{} document(s) would change", report.changed_documents);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod executor;
pub mod report;

pub use error::{RunFailure, SanitizeError};
pub use executor::{RunOptions, execute, run};
pub use report::{ActionResult, ActionStatus, ChangeRecord, RunReport, RunState};
