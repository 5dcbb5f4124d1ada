//! Command implementations for the pf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod families;
pub mod ps;

use pod_filter_rs::filter::FilterError;
use pod_filter_rs::snapshot::SnapshotStoreError;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter compilation error.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Snapshot file error.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotStoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid command-line usage that clap cannot catch.
    #[error("{0}")]
    Usage(String),

    /// The evaluation thread pool could not be started.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// `color_default` is the `output.color` config value; `--no-color` and
    /// a set `NO_COLOR` environment variable both override it.
    pub fn from_cli(cli: &Cli, color_default: Option<bool>) -> Self {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !no_color_env && color_default.unwrap_or(true),
            quiet: cli.quiet,
        }
    }
}
