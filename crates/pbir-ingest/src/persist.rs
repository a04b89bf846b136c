//! Writing changed documents back to their origin paths.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pbir_json::encode;
use pbir_model::{Document, DocumentKey, ReportTree};
use tracing::{debug, info};

use crate::error::PersistError;

/// Encode and write the listed documents, in tree enumeration order.
///
/// Each document is replaced atomically (temp file + rename). The tree as a
/// whole is not: if a write fails, documents written before it stay written.
///
/// Returns the paths that were written.
///
/// # Errors
///
/// Returns [`PersistError`] for the first document that cannot be encoded or
/// written, or if a key does not address a document of `tree`.
pub fn persist(
    tree: &ReportTree,
    changed: &BTreeSet<DocumentKey>,
) -> Result<Vec<PathBuf>, PersistError> {
    if let Some(unknown) = changed.iter().find(|key| tree.document(key).is_none()) {
        return Err(PersistError::UnknownDocument {
            key: unknown.to_string(),
        });
    }

    let mut written = Vec::with_capacity(changed.len());
    for key in tree.keys().into_iter().filter(|key| changed.contains(key)) {
        let Some(document) = tree.document(&key) else {
            continue;
        };
        write_document(document)?;
        debug!(document = %key, path = %document.path.display(), "document written");
        written.push(document.path.clone());
    }

    info!(document_count = written.len(), "changes persisted");
    Ok(written)
}

/// Encode one document and replace its file.
///
/// # Errors
///
/// Returns [`PersistError`] if encoding or any file operation fails.
pub fn write_document(document: &Document) -> Result<(), PersistError> {
    let path = &document.path;
    let text = encode(&document.value, &document.layout).map_err(|source| PersistError::Encode {
        path: path.clone(),
        source,
    })?;

    let temp_path = path.with_extension("json.tmp");
    if let Err(error) = replace_file(path, &temp_path, text.as_bytes()) {
        // The original error is the one worth reporting.
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }
    Ok(())
}

fn replace_file(path: &Path, temp_path: &Path, contents: &[u8]) -> Result<(), PersistError> {
    let mut file = File::create(temp_path).map_err(|e| io_error("create", temp_path, e))?;
    file.write_all(contents)
        .map_err(|e| io_error("write", temp_path, e))?;
    file.sync_all()
        .map_err(|e| io_error("sync", temp_path, e))?;
    fs::rename(temp_path, path).map_err(|e| io_error("replace", path, e))
}

fn io_error(operation: &'static str, path: &Path, source: std::io::Error) -> PersistError {
    PersistError::Io {
        operation,
        path: path.to_path_buf(),
        source,
    }
}
