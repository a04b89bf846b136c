//! Report layout and directory discovery.

use std::path::{Path, PathBuf};

use pbir_model::DocumentKind;

use crate::error::LoadError;

const DEFINITION_DIR: &str = "definition";
const PAGES_DIR: &str = "pages";
const VISUALS_DIR: &str = "visuals";

/// Fixed locations of the documents under a report root.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    root: PathBuf,
}

impl ReportLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn report_document(&self) -> PathBuf {
        self.root
            .join(DEFINITION_DIR)
            .join(DocumentKind::Report.file_name())
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(DEFINITION_DIR).join(PAGES_DIR)
    }

    pub fn page_document(&self, page: &str) -> PathBuf {
        self.pages_dir()
            .join(page)
            .join(DocumentKind::Page.file_name())
    }

    pub fn visuals_dir(&self, page: &str) -> PathBuf {
        self.pages_dir().join(page).join(VISUALS_DIR)
    }

    pub fn visual_document(&self, page: &str, visual: &str) -> PathBuf {
        self.visuals_dir(page)
            .join(visual)
            .join(DocumentKind::Visual.file_name())
    }
}

/// Lists the subdirectories of `dir` as `(name, path)` pairs sorted by name.
///
/// A missing directory yields an empty list; files are skipped.
pub fn list_subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>, LoadError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(LoadError::corrupt(dir, "expected a directory"));
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| LoadError::corrupt(dir, format!("cannot read directory: {e}")))?;

    let mut found = Vec::new();
    for entry_result in entries {
        let entry = entry_result
            .map_err(|e| LoadError::corrupt(dir, format!("cannot read directory: {e}")))?;
        let path = entry.path();

        // Skip files such as pages.json next to the page folders
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Err(LoadError::corrupt(&path, "directory name is not valid UTF-8"));
        };
        found.push((name.to_string(), path.clone()));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}
