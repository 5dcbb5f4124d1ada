use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::{load_config, load_config_or_default};
use commands::{CommandContext, CommandError};
use dispatch::Dispatch;
use pod_filter_rs::filter::FilterError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&cli, &e);
            error_exit_code(&e)
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or the
/// pod-filter crates' debug output with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,pod_filter_rs=debug,pf=debug"
    } else {
        "warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let dispatch = Dispatch::from_cli(cli);

    let (config, load_error) = if dispatch.tolerates_broken_config() {
        load_config_or_default()
    } else {
        (load_config()?, None)
    };

    let ctx = CommandContext::from_cli(cli, config.output.color);
    dispatch.execute(&ctx, config, load_error.as_ref())
}

fn report_error(cli: &Cli, e: &CommandError) {
    let suggestion = match e {
        CommandError::Filter(err) => err.suggestion(),
        _ => None,
    };

    if cli.json {
        let mut error_json = serde_json::json!({
            "error": {
                "code": error_code(e),
                "message": e.to_string(),
            }
        });
        if let Some(suggestion) = suggestion {
            error_json["error"]["suggestion"] = serde_json::Value::from(suggestion);
        }
        match serde_json::to_string_pretty(&error_json) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{error_json}"),
        }
    } else {
        eprintln!("Error: {e}");
        if let Some(suggestion) = suggestion {
            eprintln!("Did you mean '{suggestion}'?");
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(FilterError::UnknownFamily { .. }) => "UNKNOWN_FILTER",
        CommandError::Filter(FilterError::Network(_)) => "NETWORK_ERROR",
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Snapshot(_) => "SNAPSHOT_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Usage(_) => "USAGE_ERROR",
        CommandError::ThreadPool(_) => "THREAD_POOL_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Filter(_) | CommandError::Usage(_) => ExitCode::from(1),
        CommandError::Snapshot(_) => ExitCode::from(3),
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::ThreadPool(_) | CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}
