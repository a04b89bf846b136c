//! Run state and per-action results.

use std::fmt;
use std::path::PathBuf;

use pbir_model::DocumentKey;
use pbir_transform::ActionDefinition;
use serde::Serialize;

use crate::error::SanitizeError;

/// Lifecycle of one invocation.
///
/// `Idle -> Loaded -> Running -> DryRunComplete | Persisted`, with any fatal
/// error moving to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Loaded,
    Running,
    DryRunComplete,
    Persisted,
    Failed,
}

impl RunState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loaded => "loaded",
            Self::Running => "running",
            Self::DryRunComplete => "dry_run_complete",
            Self::Persisted => "persisted",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One document changed by one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub key: DocumentKey,
    pub path: PathBuf,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Completed,
    /// The transform returned an error on `document`; changes the action had
    /// made were rolled back.
    Failed { document: DocumentKey, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub action: String,
    pub description: String,
    pub status: ActionStatus,
    pub documents_changed: usize,
    pub changes: Vec<ChangeRecord>,
}

impl ActionResult {
    pub(crate) fn new(action: &ActionDefinition) -> Self {
        Self {
            action: action.name.clone(),
            description: action.description.clone(),
            status: ActionStatus::Completed,
            documents_changed: 0,
            changes: Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, ActionStatus::Failed { .. })
    }
}

/// Outcome of a run, in action order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunReport {
    pub state: RunState,
    pub dry_run: bool,
    pub results: Vec<ActionResult>,
    /// Distinct documents changed by completed actions.
    pub changed_documents: usize,
    pub any_change: bool,
    /// Files written back; empty for a dry run.
    pub persisted: Vec<PathBuf>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn failed_actions(&self) -> Vec<&ActionResult> {
        self.results.iter().filter(|result| result.is_failed()).collect()
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(ActionResult::is_failed)
    }

    /// Number of change records across all actions.
    pub fn change_count(&self) -> usize {
        self.results.iter().map(|result| result.changes.len()).sum()
    }

    /// Assert whether the run was expected to change anything.
    ///
    /// `expect_change = false` is the CI gate: a tree that still needs
    /// sanitizing fails with [`SanitizeError::ChangeGateViolation`].
    ///
    /// # Errors
    ///
    /// [`SanitizeError::ChangeGateViolation`] or
    /// [`SanitizeError::NothingChanged`] when `any_change` does not match.
    pub fn check_gate(&self, expect_change: bool) -> Result<(), SanitizeError> {
        match (expect_change, self.any_change) {
            (false, true) => Err(SanitizeError::ChangeGateViolation {
                changed: self.changed_documents,
            }),
            (true, false) => Err(SanitizeError::NothingChanged),
            _ => Ok(()),
        }
    }
}
