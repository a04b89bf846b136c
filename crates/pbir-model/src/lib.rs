//! Data model for a report definition tree.
//!
//! A report is one root document plus one document per page and one per
//! visual, each loaded from a fixed location under the report root. This
//! crate holds the in-memory shape of that tree and the keys used to address
//! individual documents; loading and persisting live in `pbir-ingest`.

pub mod document;
pub mod error;
pub mod key;
pub mod scope;
pub mod summary;
pub mod tree;

pub use document::{Document, DocumentKind};
pub use error::{ModelError, ShapeError};
pub use key::DocumentKey;
pub use scope::Scope;
pub use summary::TreeSummary;
pub use tree::{Page, ReportTree, Visual};
