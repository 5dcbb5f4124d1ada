//! Command dispatch module for routing CLI commands to their handlers.

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::config::{self, Config};
use crate::commands::ps::PsOptions;
use crate::commands::{self, CommandContext, CommandError, Result};

/// A command ready to run.
pub enum Dispatch<'a> {
    Ps(PsOptions),
    Families,
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> Dispatch<'a> {
    /// Maps parsed CLI arguments to the command to run.
    pub fn from_cli(cli: &'a Cli) -> Self {
        match &cli.command {
            Some(Commands::Ps {
                file,
                filters,
                ctr_names,
                workers,
            }) => Self::Ps(PsOptions {
                file: file.clone(),
                filters: filters.clone(),
                ctr_names: ctr_names.map(Into::into),
                workers: workers.map(usize::from),
            }),
            Some(Commands::Families) => Self::Families,
            Some(Commands::Config { command }) => Self::Config(command),
            Some(Commands::Completions { shell }) => Self::Completions(shell),
            None => Self::Help,
        }
    }

    /// Whether the command still runs when the config file cannot be loaded.
    pub fn tolerates_broken_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Completions(_))
    }

    /// Runs the command.
    ///
    /// `load_error` is set when `config` holds defaults because the file on
    /// disk could not be loaded.
    pub fn execute(
        &self,
        ctx: &CommandContext,
        config: Config,
        load_error: Option<&CommandError>,
    ) -> Result<()> {
        match self {
            Self::Ps(opts) => commands::ps::execute(ctx, opts, &config),
            Self::Families => commands::families::execute(ctx),
            Self::Config(command) => dispatch_config(ctx, command, config, load_error),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("pf - filter pod snapshots");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(
    ctx: &CommandContext,
    command: &Option<ConfigCommands>,
    config: Config,
    load_error: Option<&CommandError>,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => config::execute_show(ctx, &config, load_error),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            config::execute_set(ctx, config, load_error, &opts)
        }
        Some(ConfigCommands::Path) => config::execute_path(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pod_filter_rs::filter::CtrNamesMatch;
    use std::path::PathBuf;

    #[test]
    fn test_ps_options_from_cli() {
        let cli = Cli::parse_from([
            "pf",
            "ps",
            "-F",
            "pods.json",
            "-f",
            "name=web",
            "--ctr-names",
            "first-child",
            "-w",
            "2",
        ]);
        match Dispatch::from_cli(&cli) {
            Dispatch::Ps(opts) => {
                assert_eq!(opts.file, Some(PathBuf::from("pods.json")));
                assert_eq!(opts.filters, vec!["name=web"]);
                assert_eq!(opts.ctr_names, Some(CtrNamesMatch::FirstChild));
                assert_eq!(opts.workers, Some(2));
            }
            _ => panic!("expected ps dispatch"),
        }
    }

    #[test]
    fn test_no_command_is_help() {
        let cli = Cli::parse_from(["pf"]);
        assert!(matches!(Dispatch::from_cli(&cli), Dispatch::Help));
    }

    #[test]
    fn test_config_without_subcommand() {
        let cli = Cli::parse_from(["pf", "config"]);
        assert!(matches!(Dispatch::from_cli(&cli), Dispatch::Config(None)));
    }

    #[test]
    fn test_only_config_and_completions_tolerate_broken_config() {
        for args in [
            &["pf", "config", "set", "snapshot", "pods.json"][..],
            &["pf", "config", "show"],
            &["pf", "completions", "fish"],
        ] {
            let cli = Cli::parse_from(args);
            assert!(Dispatch::from_cli(&cli).tolerates_broken_config(), "{args:?}");
        }
        for args in [&["pf", "ps"][..], &["pf", "families"], &["pf"]] {
            let cli = Cli::parse_from(args);
            assert!(!Dispatch::from_cli(&cli).tolerates_broken_config(), "{args:?}");
        }
    }
}
