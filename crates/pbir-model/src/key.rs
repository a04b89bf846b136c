use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::DocumentKind;

/// Address of one document inside a [`ReportTree`](crate::ReportTree).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentKey {
    Report,
    Page { page: String },
    Visual { page: String, visual: String },
}

impl DocumentKey {
    pub fn page(page: impl Into<String>) -> Self {
        Self::Page { page: page.into() }
    }

    pub fn visual(page: impl Into<String>, visual: impl Into<String>) -> Self {
        Self::Visual {
            page: page.into(),
            visual: visual.into(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Report => DocumentKind::Report,
            Self::Page { .. } => DocumentKind::Page,
            Self::Visual { .. } => DocumentKind::Visual,
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => f.write_str("report"),
            Self::Page { page } => write!(f, "page {page}"),
            Self::Visual { page, visual } => write!(f, "visual {page}/{visual}"),
        }
    }
}
