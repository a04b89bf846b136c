//! The report tree: root document, pages, visuals.

use std::path::PathBuf;

use crate::document::{Document, DocumentKind};
use crate::key::DocumentKey;
use crate::scope::Scope;

/// A visual document and its directory name.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub id: String,
    pub document: Document,
}

/// A page document and the visuals below it, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: String,
    pub document: Document,
    pub visuals: Vec<Visual>,
}

impl Page {
    pub fn visual(&self, id: &str) -> Option<&Visual> {
        self.visuals.iter().find(|visual| visual.id == id)
    }
}

/// Every document of one report, built once per invocation.
///
/// Enumeration order is fixed: the report document, then pages in discovery
/// order, each page followed by its visuals in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTree {
    /// Report root directory the tree was loaded from.
    pub root: PathBuf,
    pub report: Document,
    pub pages: Vec<Page>,
}

impl ReportTree {
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    pub fn visual_count(&self) -> usize {
        self.pages.iter().map(|page| page.visuals.len()).sum()
    }

    pub fn document_count(&self) -> usize {
        1 + self.pages.len() + self.visual_count()
    }

    /// Keys of all documents in enumeration order.
    pub fn keys(&self) -> Vec<DocumentKey> {
        self.keys_in(Scope::All)
    }

    /// Keys of the documents a scope selects, in enumeration order.
    pub fn keys_in(&self, scope: Scope) -> Vec<DocumentKey> {
        let mut keys = Vec::with_capacity(self.document_count());
        if scope.includes(DocumentKind::Report) {
            keys.push(DocumentKey::Report);
        }
        for page in &self.pages {
            if scope.includes(DocumentKind::Page) {
                keys.push(DocumentKey::page(&page.id));
            }
            if scope.includes(DocumentKind::Visual) {
                for visual in &page.visuals {
                    keys.push(DocumentKey::visual(&page.id, &visual.id));
                }
            }
        }
        keys
    }

    pub fn document(&self, key: &DocumentKey) -> Option<&Document> {
        match key {
            DocumentKey::Report => Some(&self.report),
            DocumentKey::Page { page } => self.page(page).map(|p| &p.document),
            DocumentKey::Visual { page, visual } => self
                .page(page)
                .and_then(|p| p.visual(visual))
                .map(|v| &v.document),
        }
    }

    pub fn document_mut(&mut self, key: &DocumentKey) -> Option<&mut Document> {
        match key {
            DocumentKey::Report => Some(&mut self.report),
            DocumentKey::Page { page } => self
                .pages
                .iter_mut()
                .find(|p| &p.id == page)
                .map(|p| &mut p.document),
            DocumentKey::Visual { page, visual } => self
                .pages
                .iter_mut()
                .find(|p| &p.id == page)
                .and_then(|p| p.visuals.iter_mut().find(|v| &v.id == visual))
                .map(|v| &mut v.document),
        }
    }
}
