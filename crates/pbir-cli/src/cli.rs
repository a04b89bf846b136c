//! CLI argument definitions for the report sanitizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pbir-sanitize",
    version,
    about = "Sanitize report definition folders",
    long_about = "Apply a configured sequence of idempotent clean-up actions to the\n\
                  JSON documents of a report definition folder.\n\n\
                  Use --dry-run to preview changes and --error-on-change to gate CI."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the configured actions over a report folder.
    Sanitize(SanitizeArgs),

    /// List the actions a sanitize run would execute, in order.
    Actions(ActionsArgs),
}

#[derive(Parser)]
pub struct SanitizeArgs {
    /// Report root folder (the one containing `definition/`).
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Report what would change without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// List every change, not only per-action counts.
    #[arg(long = "summary")]
    pub summary: bool,

    /// Exit with status 2 if any document would change. Implies --dry-run.
    #[arg(long = "error-on-change")]
    pub error_on_change: bool,

    /// Output format for the run report.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct ActionsArgs {
    /// Report root used to discover a project configuration file.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Configuration source and action selection, shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file layered over the packaged defaults.
    ///
    /// Without this flag, `pbir-sanitize.toml` is looked up in the report
    /// root and its parent folders.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run exactly these actions, in this order.
    #[arg(long = "actions", value_name = "NAME", value_delimiter = ',')]
    pub actions: Option<Vec<String>>,

    /// Skip these actions.
    #[arg(long = "exclude", value_name = "NAME", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Run these defined actions in addition to the configured ones.
    #[arg(long = "include", value_name = "NAME", value_delimiter = ',')]
    pub include: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
