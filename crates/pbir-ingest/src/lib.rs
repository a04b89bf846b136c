//! Report tree ingestion: discovery, atomic loading and persistence.
//!
//! A report root has a fixed layout:
//!
//! ```text
//! <root>/definition/report.json
//! <root>/definition/pages/<page>/page.json
//! <root>/definition/pages/<page>/visuals/<visual>/visual.json
//! ```
//!
//! [`load_report`] reads the whole tree or fails; it never returns a partial
//! tree. [`persist`] writes back only the documents it is told about.

pub mod discovery;
pub mod error;
pub mod load;
pub mod persist;

pub use discovery::{ReportLayout, list_subdirectories};
pub use error::{LoadError, PersistError};
pub use load::{load_document, load_report};
pub use persist::{persist, write_document};
