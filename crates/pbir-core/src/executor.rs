//! The sanitize pipeline.
//!
//! [`run`] drives one invocation end to end:
//!
//! 1. **Load**: read the whole report tree (`Idle -> Loaded`)
//! 2. **Execute**: apply every action in order (`Loaded -> Running`)
//! 3. **Finish**: persist changed documents (`Persisted`) or stop after a
//!    dry run (`DryRunComplete`)
//! 4. **Gate**: with `fail_on_change`, fail when anything would change
//!
//! [`execute`] is the in-memory part and can be used on a tree the caller
//! already holds.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Instant;

use pbir_ingest::{load_report, persist};
use pbir_json::Value;
use pbir_model::{DocumentKey, ReportTree, TreeSummary};
use pbir_transform::{ActionDefinition, Outcome, ResolvedOptions, TransformContext};
use tracing::{debug, info, info_span, warn};

use crate::error::{RunFailure, SanitizeError};
use crate::report::{ActionResult, ActionStatus, ChangeRecord, RunReport, RunState};

/// Flags that change how a run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub dry_run: bool,
    /// Fail the run when any document would change. Implies a dry run.
    pub fail_on_change: bool,
}

impl RunOptions {
    pub fn effective_dry_run(self) -> bool {
        self.dry_run || self.fail_on_change
    }
}

impl From<ResolvedOptions> for RunOptions {
    fn from(options: ResolvedOptions) -> Self {
        Self {
            dry_run: options.dry_run,
            fail_on_change: options.fail_on_change,
        }
    }
}

/// Load the report at `root`, apply `actions` and persist the result.
///
/// # Errors
///
/// Returns a [`RunFailure`] carrying the partial report when loading fails,
/// an action breaks a document's structure, a write fails, or the change
/// gate trips. A transform error is not fatal: it is reported as a failed
/// action in the returned report.
pub fn run(
    root: &Path,
    actions: &[ActionDefinition],
    options: RunOptions,
) -> Result<RunReport, RunFailure> {
    let span = info_span!("sanitize", root = %root.display());
    let _guard = span.enter();
    let dry_run = options.effective_dry_run();
    let mut report = RunReport::new(dry_run);
    let mut state = RunState::Idle;

    let load_start = Instant::now();
    let mut tree = match load_report(root) {
        Ok(tree) => tree,
        Err(error) => return Err(fail(error.into(), state, report)),
    };
    advance(&mut state, RunState::Loaded);
    debug!(
        document_count = tree.document_count(),
        duration_ms = load_start.elapsed().as_millis(),
        "load complete"
    );

    advance(&mut state, RunState::Running);
    let execute_start = Instant::now();
    let changed = match execute(&mut tree, actions, &mut report) {
        Ok(changed) => changed,
        Err(error) => return Err(fail(error, state, report)),
    };
    info!(
        action_count = actions.len(),
        changed_documents = changed.len(),
        failed_actions = report.failed_actions().len(),
        duration_ms = execute_start.elapsed().as_millis(),
        "actions complete"
    );

    if dry_run {
        advance(&mut state, RunState::DryRunComplete);
    } else {
        match persist(&tree, &changed) {
            Ok(paths) => report.persisted = paths,
            Err(error) => return Err(fail(error.into(), state, report)),
        }
        advance(&mut state, RunState::Persisted);
    }
    report.state = state;

    if options.fail_on_change
        && let Err(error) = report.check_gate(false)
    {
        warn!(changed_documents = report.changed_documents, "change gate tripped");
        return Err(fail(error, state, report));
    }
    Ok(report)
}

/// Apply `actions` to `tree` in order, appending one result per action to
/// `report`.
///
/// Returns the keys of every document whose value now differs from the one it
/// was loaded with. A document that later actions restored is not included.
/// The report's change totals are updated after every action.
///
/// # Errors
///
/// Returns [`SanitizeError::StructuralViolation`] when a transform leaves a
/// document that is no longer valid for its position. Results and totals of
/// the actions before it stay in `report`.
pub fn execute(
    tree: &mut ReportTree,
    actions: &[ActionDefinition],
    report: &mut RunReport,
) -> Result<BTreeSet<DocumentKey>, SanitizeError> {
    let mut loaded = BTreeMap::new();
    let mut changed = BTreeSet::new();
    for action in actions {
        let result = run_action(tree, action, &mut loaded)?;
        report.results.push(result);
        changed = differing(tree, &loaded);
        report.changed_documents = changed.len();
        report.any_change = !changed.is_empty();
    }
    Ok(changed)
}

/// Keys whose current value differs from the loaded one.
fn differing(tree: &ReportTree, loaded: &BTreeMap<DocumentKey, Value>) -> BTreeSet<DocumentKey> {
    loaded
        .iter()
        .filter(|(key, value)| {
            tree.document(key)
                .is_some_and(|document| document.value != **value)
        })
        .map(|(key, _)| key.clone())
        .collect()
}

/// Apply one action. On success the pre-change value of every document it
/// touched for the first time is added to `loaded`.
fn run_action(
    tree: &mut ReportTree,
    action: &ActionDefinition,
    loaded: &mut BTreeMap<DocumentKey, Value>,
) -> Result<ActionResult, SanitizeError> {
    let span = info_span!("action", action = %action.name, scope = %action.scope);
    let _guard = span.enter();
    let start = Instant::now();

    // Recomputed per action so later actions see earlier mutations.
    let summary = TreeSummary::from_tree(tree);
    let mut result = ActionResult::new(action);
    let mut previous: Vec<(DocumentKey, Value)> = Vec::new();

    for key in tree.keys_in(action.scope) {
        let Some(document) = tree.document_mut(&key) else {
            continue;
        };
        let ctx = TransformContext::new(document.kind, &action.params, &summary);
        let mut working = document.value.clone();

        match action.transform.apply(&mut working, &ctx) {
            Ok(Outcome::Unchanged) => {}
            Ok(Outcome::Changed(description)) => {
                document.check_shape(&working).map_err(|reason| {
                    SanitizeError::StructuralViolation {
                        action: action.name.clone(),
                        path: document.path.clone(),
                        reason,
                    }
                })?;
                debug!(document = %key, change = %description, "document changed");
                result.changes.push(ChangeRecord {
                    key: key.clone(),
                    path: document.path.clone(),
                    description,
                });
                previous.push((key, std::mem::replace(&mut document.value, working)));
            }
            Err(source) => {
                let error = SanitizeError::TransformFailure {
                    action: action.name.clone(),
                    document: key.to_string(),
                    source,
                };
                warn!(
                    document = %key,
                    rolled_back = previous.len(),
                    error = %error,
                    "action failed"
                );
                for (key, value) in previous.into_iter().rev() {
                    if let Some(document) = tree.document_mut(&key) {
                        document.value = value;
                    }
                }
                result.changes.clear();
                result.status = ActionStatus::Failed {
                    document: key,
                    error: error.to_string(),
                };
                return Ok(result);
            }
        }
    }

    result.documents_changed = result.changes.len();
    for (key, value) in previous {
        loaded.entry(key).or_insert(value);
    }
    info!(
        documents_changed = result.documents_changed,
        duration_ms = start.elapsed().as_millis(),
        "action complete"
    );
    Ok(result)
}

fn advance(state: &mut RunState, next: RunState) {
    debug!(from = %state, to = %next, "run state");
    *state = next;
}

fn fail(error: SanitizeError, state: RunState, mut partial: RunReport) -> RunFailure {
    warn!(state = %state, error = %error, "run failed");
    partial.state = RunState::Failed;
    RunFailure {
        error,
        state,
        partial,
    }
}
