//! CLI library components for the report sanitizer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
