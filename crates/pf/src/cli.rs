//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the pf CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pod_filter_rs::filter::CtrNamesMatch;

/// pf - filter pod snapshots with podman-style filters
#[derive(Parser, Debug)]
#[command(name = "pf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List pods in a snapshot that match all filters
    #[command(alias = "list")]
    Ps {
        /// Snapshot file (default: `snapshot` from config)
        #[arg(short = 'F', long, env = "PF_SNAPSHOT")]
        file: Option<PathBuf>,

        /// Filter as family=value (repeatable; same family ORs, different families AND)
        #[arg(short, long = "filter", value_name = "FAMILY=VALUE")]
        filters: Vec<String>,

        /// How ctr-names matches child containers
        #[arg(long, value_enum)]
        ctr_names: Option<CtrNames>,

        /// Worker threads used to evaluate pods, 1 to 256 (default: from config, else 1)
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=256))]
        workers: Option<u16>,
    },

    /// List the supported filter families
    Families,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}

/// Container-name matching mode for the ctr-names filter
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CtrNames {
    /// Match against every container in the pod
    AnyChild,
    /// Match against the first container only
    FirstChild,
}

impl From<CtrNames> for CtrNamesMatch {
    fn from(mode: CtrNames) -> Self {
        match mode {
            CtrNames::AnyChild => CtrNamesMatch::AnyChild,
            CtrNames::FirstChild => CtrNamesMatch::FirstChild,
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["pf", "--verbose", "families"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["pf", "--quiet", "--json", "families"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_no_color_flag() {
        let cli = Cli::parse_from(["pf", "--no-color", "families"]);
        assert!(cli.no_color);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["pf", "-v", "-q", "families"]).is_err());
    }

    #[test]
    fn test_ps_repeated_filters() {
        let cli = Cli::parse_from([
            "pf",
            "ps",
            "--file",
            "pods.json",
            "--filter",
            "status=running",
            "-f",
            "label=app",
            "--ctr-names",
            "first-child",
            "--workers",
            "4",
        ]);
        match cli.command {
            Some(Commands::Ps {
                file,
                filters,
                ctr_names,
                workers,
            }) => {
                assert_eq!(file, Some(PathBuf::from("pods.json")));
                assert_eq!(filters, vec!["status=running", "label=app"]);
                assert_eq!(ctr_names, Some(CtrNames::FirstChild));
                assert_eq!(workers, Some(4));
            }
            other => panic!("expected ps command, got {other:?}"),
        }
    }

    #[test]
    fn test_ps_alias() {
        let cli = Cli::parse_from(["pf", "list"]);
        assert!(matches!(cli.command, Some(Commands::Ps { .. })));
    }

    #[test]
    fn test_workers_range() {
        assert!(Cli::try_parse_from(["pf", "ps", "--workers", "0"]).is_err());
        assert!(Cli::try_parse_from(["pf", "ps", "--workers", "257"]).is_err());
        assert!(Cli::try_parse_from(["pf", "ps", "--workers", "256"]).is_ok());
    }

    #[test]
    fn test_ctr_names_conversion() {
        assert_eq!(
            CtrNamesMatch::from(CtrNames::AnyChild),
            CtrNamesMatch::AnyChild
        );
        assert_eq!(
            CtrNamesMatch::from(CtrNames::FirstChild),
            CtrNamesMatch::FirstChild
        );
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::parse_from(["pf", "config", "set", "filters.workers", "8"]);
        match cli.command {
            Some(Commands::Config {
                command: Some(ConfigCommands::Set { key, value }),
            }) => {
                assert_eq!(key, "filters.workers");
                assert_eq!(value, "8");
            }
            other => panic!("expected config set, got {other:?}"),
        }
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::parse_from(["pf", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Zsh })
        ));
    }
}
