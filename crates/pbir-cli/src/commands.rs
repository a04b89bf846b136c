use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use pbir_core::{RunOptions, RunReport, run};
use pbir_transform::{
    ResolvedConfig, SanitizeConfig, Selection, TransformRegistry, find_project_config, resolve,
};

use crate::cli::{ActionsArgs, ConfigArgs, ReportFormatArg, SanitizeArgs};
use crate::summary::{actions_table, print_summary};

/// Process exit status of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// A fatal error, or at least one action failed.
    Failure,
    /// `--error-on-change` found documents that would change.
    ChangeDetected,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::ChangeDetected => 2,
        }
    }

    pub fn for_report(report: &RunReport) -> Self {
        if report.has_failures() {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

/// Resolve the packaged defaults, the project configuration and the
/// selection flags into an ordered action list.
pub fn load_config(root: Option<&Path>, args: &ConfigArgs) -> Result<ResolvedConfig> {
    let base = SanitizeConfig::packaged_default().context("load packaged configuration")?;
    let project = match &args.config {
        Some(path) => Some(path.clone()),
        None => root.and_then(find_project_config),
    };
    let overlay = match &project {
        Some(path) => {
            debug!(path = %path.display(), "using project configuration");
            Some(SanitizeConfig::load(path)?)
        }
        None => None,
    };
    let selection = Selection {
        only: args.actions.clone(),
        include: args.include.clone(),
        exclude: args.exclude.clone(),
    };
    let resolved = resolve(base, overlay, &selection, &TransformRegistry::builtin())?;
    info!(action_count = resolved.actions.len(), "configuration resolved");
    Ok(resolved)
}

pub fn run_actions(args: &ActionsArgs) -> Result<()> {
    let resolved = load_config(args.root.as_deref(), &args.config)?;
    println!("{}", actions_table(&resolved.actions));
    Ok(())
}

pub fn run_sanitize(args: &SanitizeArgs) -> Result<ExitStatus> {
    let span = info_span!("command", root = %args.root.display());
    let _guard = span.enter();
    let start = Instant::now();

    let resolved = load_config(Some(&args.root), &args.config)?;
    let mut options = RunOptions::from(resolved.options);
    options.dry_run |= args.dry_run;
    options.fail_on_change |= args.error_on_change;
    let detailed = args.summary || resolved.options.summary;

    let outcome = run(&args.root, &resolved.actions, options);
    info!(duration_ms = start.elapsed().as_millis(), "sanitize finished");
    match outcome {
        Ok(report) => {
            emit_report(&report, args.format, detailed)?;
            Ok(ExitStatus::for_report(&report))
        }
        Err(failure) if failure.error.is_gate() => {
            emit_report(&failure.partial, args.format, detailed)?;
            eprintln!("error: {}", failure.error);
            Ok(ExitStatus::ChangeDetected)
        }
        Err(failure) => {
            if !failure.partial.results.is_empty() {
                emit_report(&failure.partial, args.format, detailed)?;
            }
            Err(failure).with_context(|| format!("sanitize {}", args.root.display()))
        }
    }
}

pub fn render_json(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize run report")
}

fn emit_report(report: &RunReport, format: ReportFormatArg, detailed: bool) -> Result<()> {
    match format {
        ReportFormatArg::Table => print_summary(report, detailed),
        ReportFormatArg::Json => println!("{}", render_json(report)?),
    }
    Ok(())
}
