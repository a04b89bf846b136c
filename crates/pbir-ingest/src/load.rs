//! Atomic loading of a report tree.

use std::io::ErrorKind;
use std::path::Path;

use pbir_json::decode;
use pbir_model::document::{is_document_object, value_type_name};
use pbir_model::{Document, DocumentKind, Page, ReportTree, Visual};
use tracing::{debug, info};

use crate::discovery::{ReportLayout, list_subdirectories};
use crate::error::LoadError;

/// Load every document under a report root.
///
/// Pages and visuals are enumerated in directory-name order. Any missing,
/// unreadable or malformed document fails the whole load.
///
/// # Errors
///
/// - [`LoadError::NotAReport`] when `definition/report.json` is absent.
/// - [`LoadError::Corrupt`] when a page or visual folder lacks its document,
///   a file cannot be read, or a document is not a JSON object.
/// - [`LoadError::Parse`] when a document is not valid JSON.
pub fn load_report(root: &Path) -> Result<ReportTree, LoadError> {
    let layout = ReportLayout::new(root);
    let report_path = layout.report_document();
    if !report_path.is_file() {
        return Err(LoadError::NotAReport { path: report_path });
    }
    let report = load_document(DocumentKind::Report, &report_path)?;

    let mut pages = Vec::new();
    for (page_id, _) in list_subdirectories(&layout.pages_dir())? {
        let document = load_document(DocumentKind::Page, &layout.page_document(&page_id))?;

        let mut visuals = Vec::new();
        for (visual_id, _) in list_subdirectories(&layout.visuals_dir(&page_id))? {
            let path = layout.visual_document(&page_id, &visual_id);
            let document = load_document(DocumentKind::Visual, &path)?;
            visuals.push(Visual {
                id: visual_id,
                document,
            });
        }

        debug!(page = %page_id, visual_count = visuals.len(), "loaded page");
        pages.push(Page {
            id: page_id,
            document,
            visuals,
        });
    }

    let tree = ReportTree {
        root: root.to_path_buf(),
        report,
        pages,
    };
    info!(
        root = %root.display(),
        page_count = tree.pages.len(),
        visual_count = tree.visual_count(),
        "report loaded"
    );
    Ok(tree)
}

/// Read and decode a single document.
///
/// # Errors
///
/// Returns [`LoadError::Corrupt`] for missing/unreadable files or a
/// non-object top-level value, and [`LoadError::Parse`] for malformed JSON.
pub fn load_document(kind: DocumentKind, path: &Path) -> Result<Document, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::corrupt(path, format!("missing {kind} document")),
        _ => LoadError::corrupt(path, format!("cannot read {kind} document: {e}")),
    })?;

    let decoded = decode(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !is_document_object(&decoded.value) {
        return Err(LoadError::corrupt(
            path,
            format!(
                "{kind} document must be a JSON object, found {}",
                value_type_name(&decoded.value)
            ),
        ));
    }

    Ok(Document::new(kind, path, decoded.value, decoded.layout))
}
