use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::DocumentKind;
use crate::error::ModelError;

/// Which documents of the tree an action visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Report, every page, every visual.
    #[default]
    All,
    Report,
    Pages,
    Visuals,
}

impl Scope {
    pub fn includes(self, kind: DocumentKind) -> bool {
        match self {
            Self::All => true,
            Self::Report => kind == DocumentKind::Report,
            Self::Pages => kind == DocumentKind::Page,
            Self::Visuals => kind == DocumentKind::Visual,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Report => "report",
            Self::Pages => "pages",
            Self::Visuals => "visuals",
        }
    }
}

impl FromStr for Scope {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "report" => Ok(Self::Report),
            "pages" | "page" => Ok(Self::Pages),
            "visuals" | "visual" => Ok(Self::Visuals),
            _ => Err(ModelError::InvalidScope(value.to_string())),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
