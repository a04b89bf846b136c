//! End-to-end runs of the sanitize pipeline over on-disk report trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pbir_core::{ActionStatus, RunOptions, RunReport, RunState, SanitizeError, execute, run};
use pbir_ingest::LoadError;
use pbir_json::Value;
use pbir_model::{DocumentKey, DocumentKind, Page, ReportTree, Scope, Visual};
use pbir_transform::{
    ActionDefinition, Outcome, Params, SanitizeConfig, Selection, Transform, TransformContext,
    TransformError, TransformRegistry, resolve,
};

const REPORT: &str = "{\n  \"themeCollection\": {}\n}\n";
const PAGE: &str = "{\n  \"name\": \"p1\",\n  \"displayName\": \"Overview\",\n  \"width\": 1280,\n  \"height\": 720\n}\n";
const VISUAL: &str = "{\n  \"name\": \"v1\",\n  \"position\": {\n    \"x\": 12.0,\n    \"y\": 40.5\n  },\n  \"visual\": {\n    \"visualType\": \"card\"\n  },\n  \"visualInteractions\": []\n}\n";
const VISUAL_SANITIZED: &str = "{\n  \"name\": \"v1\",\n  \"position\": {\n    \"x\": 12.0,\n    \"y\": 40.5\n  },\n  \"visual\": {\n    \"visualType\": \"card\"\n  }\n}\n";

const REPORT_PATH: &str = "definition/report.json";
const PAGE_PATH: &str = "definition/pages/p1/page.json";
const VISUAL_PATH: &str = "definition/pages/p1/visuals/v1/visual.json";

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn build_report(root: &Path) {
    write(&root.join(REPORT_PATH), REPORT);
    write(&root.join(PAGE_PATH), PAGE);
    write(&root.join(VISUAL_PATH), VISUAL);
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn actions(selection: &Selection) -> Vec<ActionDefinition> {
    resolve(
        SanitizeConfig::packaged_default().unwrap(),
        None,
        selection,
        &TransformRegistry::builtin(),
    )
    .unwrap()
    .actions
}

fn default_actions() -> Vec<ActionDefinition> {
    actions(&Selection::default())
}

fn custom(name: &str, scope: Scope, transform: impl Transform + 'static) -> ActionDefinition {
    ActionDefinition {
        name: name.to_string(),
        description: name.replace('_', " "),
        implementation: name.to_string(),
        scope,
        params: Params::new(),
        transform: Arc::new(transform),
    }
}

fn dry_run() -> RunOptions {
    RunOptions {
        dry_run: true,
        ..RunOptions::default()
    }
}

fn gate() -> RunOptions {
    RunOptions {
        fail_on_change: true,
        ..RunOptions::default()
    }
}

/// Tags the report and pages, then fails on the first visual.
struct TagThenFail;

impl Transform for TagThenFail {
    fn name(&self) -> &'static str {
        "tag_then_fail"
    }

    fn description(&self) -> &'static str {
        "tag documents until a visual is reached"
    }

    fn apply(&self, value: &mut Value, ctx: &TransformContext<'_>) -> Result<Outcome, TransformError> {
        if ctx.kind == DocumentKind::Visual {
            return Err(TransformError::UnexpectedContent {
                path: "visual".to_string(),
                message: "cannot handle visuals".to_string(),
            });
        }
        value["tagged"] = Value::Bool(true);
        Ok(Outcome::changed("tag document"))
    }
}

/// Renames every document it visits.
struct Rename;

impl Transform for Rename {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn description(&self) -> &'static str {
        "rename documents"
    }

    fn apply(&self, value: &mut Value, _ctx: &TransformContext<'_>) -> Result<Outcome, TransformError> {
        value["name"] = Value::String("renamed".to_string());
        Ok(Outcome::changed("rename"))
    }
}

/// Mutates the document but claims it did nothing.
struct SilentEdit;

impl Transform for SilentEdit {
    fn name(&self) -> &'static str {
        "silent_edit"
    }

    fn description(&self) -> &'static str {
        "edit without reporting"
    }

    fn apply(&self, value: &mut Value, _ctx: &TransformContext<'_>) -> Result<Outcome, TransformError> {
        value["edited"] = Value::Bool(true);
        Ok(Outcome::Unchanged)
    }
}

/// Hides a visual, or shows it again when `show` is set.
struct ToggleHidden {
    show: bool,
}

impl Transform for ToggleHidden {
    fn name(&self) -> &'static str {
        "toggle_hidden"
    }

    fn description(&self) -> &'static str {
        "toggle visual visibility"
    }

    fn apply(&self, value: &mut Value, _ctx: &TransformContext<'_>) -> Result<Outcome, TransformError> {
        let Some(visual) = value.as_object_mut() else {
            return Ok(Outcome::Unchanged);
        };
        if self.show {
            if visual.shift_remove("isHidden").is_none() {
                return Ok(Outcome::Unchanged);
            }
            return Ok(Outcome::changed("show visual"));
        }
        if visual.contains_key("isHidden") {
            return Ok(Outcome::Unchanged);
        }
        visual.insert("isHidden".to_string(), Value::Bool(true));
        Ok(Outcome::changed("hide visual"))
    }
}

/// Switches every visual to a card.
struct UseCards;

impl Transform for UseCards {
    fn name(&self) -> &'static str {
        "use_cards"
    }

    fn description(&self) -> &'static str {
        "switch visuals to cards"
    }

    fn apply(&self, value: &mut Value, _ctx: &TransformContext<'_>) -> Result<Outcome, TransformError> {
        if value["visual"]["visualType"] == "card" {
            return Ok(Outcome::Unchanged);
        }
        value["visual"]["visualType"] = Value::String("card".to_string());
        Ok(Outcome::changed("use card"))
    }
}

#[test]
fn dry_run_reports_change_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());

    let report = run(dir.path(), &default_actions(), dry_run()).unwrap();

    assert_eq!(report.state, RunState::DryRunComplete);
    assert!(report.dry_run);
    assert!(report.any_change);
    assert_eq!(report.changed_documents, 1);
    assert_eq!(report.change_count(), 1);
    assert!(report.persisted.is_empty());

    let interactions = report
        .results
        .iter()
        .find(|result| result.action == "remove_empty_interactions")
        .unwrap();
    assert_eq!(interactions.documents_changed, 1);
    assert_eq!(interactions.changes[0].key, DocumentKey::visual("p1", "v1"));
    assert_eq!(interactions.changes[0].description, "remove empty visualInteractions");
    assert_eq!(interactions.changes[0].path, dir.path().join(VISUAL_PATH));

    assert_eq!(read(dir.path(), VISUAL_PATH), VISUAL);
    assert_eq!(read(dir.path(), PAGE_PATH), PAGE);
    assert_eq!(read(dir.path(), REPORT_PATH), REPORT);
}

#[test]
fn persists_only_changed_documents_byte_exact() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());

    let report = run(dir.path(), &default_actions(), RunOptions::default()).unwrap();

    assert_eq!(report.state, RunState::Persisted);
    assert_eq!(report.persisted, vec![dir.path().join(VISUAL_PATH)]);
    assert_eq!(read(dir.path(), VISUAL_PATH), VISUAL_SANITIZED);
    assert_eq!(read(dir.path(), PAGE_PATH), PAGE);
    assert_eq!(read(dir.path(), REPORT_PATH), REPORT);

    // A sanitized tree has nothing left to do.
    let again = run(dir.path(), &default_actions(), RunOptions::default()).unwrap();
    assert!(!again.any_change);
    assert!(again.persisted.is_empty());
}

#[test]
fn repeated_dry_runs_produce_identical_reports() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());

    let first = run(dir.path(), &default_actions(), dry_run()).unwrap();
    let second = run(dir.path(), &default_actions(), dry_run()).unwrap();

    assert_eq!(first, second);
    let names: Vec<&str> = first.results.iter().map(|r| r.action.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "disable_show_items_with_no_data",
            "hide_tooltip_pages",
            "remove_unused_custom_visuals",
            "remove_empty_interactions",
            "remove_empty_container_objects",
        ]
    );
}

#[test]
fn change_gate_passes_on_sanitized_tree() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());
    write(&dir.path().join(VISUAL_PATH), VISUAL_SANITIZED);

    let report = run(dir.path(), &default_actions(), gate()).unwrap();

    assert!(!report.any_change);
    assert!(report.dry_run);
    assert_eq!(report.state, RunState::DryRunComplete);
}

#[test]
fn change_gate_fails_on_dirty_tree_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());

    let failure = run(dir.path(), &default_actions(), gate()).unwrap_err();

    assert!(matches!(
        failure.error,
        SanitizeError::ChangeGateViolation { changed: 1 }
    ));
    assert!(failure.error.is_gate());
    assert_eq!(failure.state, RunState::DryRunComplete);
    assert_eq!(failure.partial.state, RunState::Failed);
    assert!(failure.partial.any_change);
    assert_eq!(read(dir.path(), VISUAL_PATH), VISUAL);
}

#[test]
fn missing_report_fails_before_any_action() {
    let dir = tempfile::tempdir().unwrap();

    let failure = run(dir.path(), &default_actions(), RunOptions::default()).unwrap_err();

    assert!(matches!(
        failure.error,
        SanitizeError::Load(LoadError::NotAReport { .. })
    ));
    assert_eq!(failure.state, RunState::Idle);
    assert!(failure.partial.results.is_empty());
}

#[test]
fn malformed_document_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());
    write(
        &dir.path().join("definition/pages/p1/visuals/v2/visual.json"),
        "{\n  \"name\": \"v2\",\n  \"visualInteractions\": [\n}\n",
    );

    let failure = run(dir.path(), &default_actions(), RunOptions::default()).unwrap_err();

    match failure.error {
        SanitizeError::Load(LoadError::Parse { path, source }) => {
            assert!(path.ends_with("v2/visual.json"));
            assert_eq!(source.line, 4);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(read(dir.path(), VISUAL_PATH), VISUAL);
}

#[test]
fn failed_action_is_rolled_back_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());
    let mut actions = vec![custom("tag_then_fail", Scope::All, TagThenFail)];
    actions.extend(actions_named(&["remove_empty_interactions"]));

    let report = run(dir.path(), &actions, RunOptions::default()).unwrap();

    assert!(report.has_failures());
    let failed = report.failed_actions();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].action, "tag_then_fail");
    assert!(failed[0].changes.is_empty());
    match &failed[0].status {
        ActionStatus::Failed { document, error } => {
            assert_eq!(document, &DocumentKey::visual("p1", "v1"));
            assert!(error.contains("cannot handle visuals"), "{error}");
        }
        ActionStatus::Completed => panic!("action should have failed"),
    }

    assert_eq!(report.results[1].status, ActionStatus::Completed);
    assert_eq!(report.persisted, vec![dir.path().join(VISUAL_PATH)]);
    assert_eq!(read(dir.path(), REPORT_PATH), REPORT);
    assert_eq!(read(dir.path(), VISUAL_PATH), VISUAL_SANITIZED);
}

#[test]
fn structural_violation_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());
    let mut actions = actions_named(&["remove_empty_interactions"]);
    actions.push(custom("rename", Scope::Visuals, Rename));

    let failure = run(dir.path(), &actions, RunOptions::default()).unwrap_err();

    match &failure.error {
        SanitizeError::StructuralViolation { action, path, .. } => {
            assert_eq!(action, "rename");
            assert_eq!(path, &dir.path().join(VISUAL_PATH));
        }
        other => panic!("expected structural violation, got {other:?}"),
    }
    assert_eq!(failure.state, RunState::Running);
    assert_eq!(failure.partial.results.len(), 1);
    assert_eq!(failure.partial.changed_documents, 1);
    assert!(failure.partial.any_change);
    assert_eq!(read(dir.path(), VISUAL_PATH), VISUAL);
}

#[test]
fn unreported_mutations_are_discarded() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());
    write(&dir.path().join(VISUAL_PATH), VISUAL_SANITIZED);
    let actions = vec![custom("silent_edit", Scope::All, SilentEdit)];

    let report = run(dir.path(), &actions, RunOptions::default()).unwrap();

    assert!(!report.any_change);
    assert!(report.persisted.is_empty());
    assert_eq!(read(dir.path(), VISUAL_PATH), VISUAL_SANITIZED);
}

#[test]
fn reverted_changes_are_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());
    let actions = vec![
        custom("hide", Scope::Visuals, ToggleHidden { show: false }),
        custom("show", Scope::Visuals, ToggleHidden { show: true }),
    ];

    let report = run(dir.path(), &actions, RunOptions::default()).unwrap();

    assert_eq!(report.change_count(), 2);
    assert_eq!(report.changed_documents, 0);
    assert!(!report.any_change);
    assert!(report.persisted.is_empty());
    assert_eq!(read(dir.path(), VISUAL_PATH), VISUAL);

    // Reverted documents do not trip the change gate either.
    assert!(run(dir.path(), &actions, gate()).is_ok());
}

#[test]
fn untouched_exponent_literals_survive_an_edit() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());
    let visual = VISUAL.replace("\"y\": 40.5", "\"y\": 4.05E+1,\n    \"z\": 1e3");
    write(&dir.path().join(VISUAL_PATH), &visual);

    run(dir.path(), &default_actions(), RunOptions::default()).unwrap();

    assert_eq!(
        read(dir.path(), VISUAL_PATH),
        VISUAL_SANITIZED.replace("\"y\": 40.5", "\"y\": 4.05E+1,\n    \"z\": 1e3")
    );
}

#[test]
fn later_actions_see_earlier_changes() {
    let dir = tempfile::tempdir().unwrap();
    build_report(dir.path());
    write(
        &dir.path().join(REPORT_PATH),
        "{\n  \"publicCustomVisuals\": [\n    \"sankey01\"\n  ]\n}\n",
    );
    write(
        &dir.path().join(VISUAL_PATH),
        &VISUAL_SANITIZED.replace("\"card\"", "\"sankey01\""),
    );
    let mut actions = vec![custom("use_cards", Scope::Visuals, UseCards)];
    actions.extend(actions_named(&["remove_unused_custom_visuals"]));

    let report = run(dir.path(), &actions, RunOptions::default()).unwrap();

    assert_eq!(report.changed_documents, 2);
    assert_eq!(read(dir.path(), REPORT_PATH), "{}\n");
    assert_eq!(read(dir.path(), VISUAL_PATH), VISUAL_SANITIZED);
}

fn actions_named(names: &[&str]) -> Vec<ActionDefinition> {
    actions(&Selection {
        only: Some(names.iter().map(|name| (*name).to_string()).collect()),
        ..Selection::default()
    })
}

fn document(kind: DocumentKind, path: &str, text: &str) -> pbir_model::Document {
    let decoded = pbir_json::decode(text).unwrap();
    pbir_model::Document::new(kind, PathBuf::from(path), decoded.value, decoded.layout)
}

#[test]
fn report_serializes_in_action_order() {
    let mut tree = ReportTree {
        root: PathBuf::from("Sales.Report"),
        report: document(DocumentKind::Report, REPORT_PATH, REPORT),
        pages: vec![Page {
            id: "p1".to_string(),
            document: document(DocumentKind::Page, PAGE_PATH, PAGE),
            visuals: vec![Visual {
                id: "v1".to_string(),
                document: document(DocumentKind::Visual, VISUAL_PATH, VISUAL),
            }],
        }],
    };
    let mut report = RunReport::default();

    let changed = execute(
        &mut tree,
        &actions_named(&["remove_empty_interactions"]),
        &mut report,
    )
    .unwrap();

    assert_eq!(changed.len(), 1);
    insta::assert_json_snapshot!(report, @r#"
    {
      "state": "idle",
      "dry_run": false,
      "results": [
        {
          "action": "remove_empty_interactions",
          "description": "Remove empty visual interaction lists",
          "status": "completed",
          "documents_changed": 1,
          "changes": [
            {
              "key": {
                "kind": "visual",
                "page": "p1",
                "visual": "v1"
              },
              "path": "definition/pages/p1/visuals/v1/visual.json",
              "description": "remove empty visualInteractions"
            }
          ]
        }
      ],
      "changed_documents": 1,
      "any_change": true,
      "persisted": []
    }
    "#);
}
