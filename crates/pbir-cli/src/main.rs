//! Report sanitizer CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use pbir_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use pbir_cli::commands::{ExitStatus, run_actions, run_sanitize};
use pbir_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let status = match cli.command {
        Command::Sanitize(args) => match run_sanitize(&args) {
            Ok(status) => status,
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitStatus::Failure
            }
        },
        Command::Actions(args) => match run_actions(&args) {
            Ok(()) => ExitStatus::Success,
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitStatus::Failure
            }
        },
    };
    std::process::exit(status.code());
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
