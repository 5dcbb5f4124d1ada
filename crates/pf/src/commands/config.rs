//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/pf/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use pod_filter_rs::filter::CtrNamesMatch;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "PF_CONFIG";

/// Upper bound for `filters.workers`.
const MAX_WORKERS: usize = 256;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default snapshot file for `pf ps`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,

    /// Filter settings.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            snapshot: None,
            filters: FiltersConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Filter configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// How `ctr-names` matches a pod's containers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctr_names: Option<CtrNamesMatch>,

    /// Worker threads used to evaluate pods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config file path.
///
/// `$PF_CONFIG` wins, then `$XDG_CONFIG_HOME/pf/config.toml`, then
/// `~/.config/pf/config.toml` on all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("pf").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("pf").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk.
///
/// A missing file yields the default configuration.
pub fn load_config() -> Result<Config> {
    let config = read_config()?;
    validate_config(&config)?;
    migrate_config(config)
}

/// Loads the configuration for the commands that manage the file itself.
///
/// Never fails: a file that cannot be read or parsed yields the defaults,
/// and a setting that fails validation is reset. The error that caused the
/// fallback is returned next to the configuration.
pub fn load_config_or_default() -> (Config, Option<CommandError>) {
    let mut config = match read_config() {
        Ok(config) => config,
        Err(e) => return (Config::default(), Some(e)),
    };

    let error = validate_config(&config).err();
    if error.is_some() {
        config.filters.workers = None;
    }

    match migrate_config(config) {
        Ok(config) => (config, error),
        Err(e) => (Config::default(), Some(e)),
    }
}

fn read_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Checks values that deserialize fine but are out of range.
fn validate_config(config: &Config) -> Result<()> {
    if let Some(workers) = config.filters.workers {
        if !(1..=MAX_WORKERS).contains(&workers) {
            return Err(CommandError::Config(format!(
                "filters.workers must be between 1 and {}, got {}",
                MAX_WORKERS, workers
            )));
        }
    }
    Ok(())
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the initial schema.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Executes the config show command.
///
/// `load_error` is the reason `config` fell back to defaults, if any; it is
/// reported with the settings instead of failing the command.
pub fn execute_show(
    ctx: &CommandContext,
    config: &Config,
    load_error: Option<&CommandError>,
) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let mut output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        if let Some(err) = load_error {
            output["error"] = serde_json::Value::from(err.to_string());
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        print!("{}", format_config_text(config, &path, ctx.use_colors));
        if let Some(err) = load_error {
            println!("\nWarning: {}", err);
            println!("Settings that could not be loaded are shown with their defaults.");
        }
    }

    Ok(())
}

fn format_config_text(config: &Config, path: &std::path::Path, use_colors: bool) -> String {
    use owo_colors::OwoColorize;

    let mut out = String::new();
    let header = "Configuration";
    if use_colors {
        out.push_str(&format!("{}\n\n", header.green().bold()));
    } else {
        out.push_str(&format!("{}\n\n", header));
    }

    out.push_str(&format!("File: {}\n", path.display()));
    out.push_str(&format!("Exists: {}\n\n", path.exists()));

    out.push_str("Settings:\n");
    match &config.snapshot {
        Some(snapshot) => out.push_str(&format!("  snapshot: {}\n", snapshot.display())),
        None => out.push_str("  snapshot: (not set)\n"),
    }

    out.push_str("\n[filters]\n");
    let ctr_names = config.filters.ctr_names.unwrap_or_default();
    out.push_str(&format!("  ctr_names: {}\n", ctr_names.as_str()));
    out.push_str(&format!("  workers: {}\n", config.filters.workers.unwrap_or(1)));

    out.push_str("\n[output]\n");
    out.push_str(&format!("  color: {}\n", config.output.color.unwrap_or(true)));
    out
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Executes the config set command.
///
/// Starts from `config`; when `load_error` is set the file on disk could not
/// be loaded and its unreadable settings are overwritten on save.
pub fn execute_set(
    ctx: &CommandContext,
    mut config: Config,
    load_error: Option<&CommandError>,
    opts: &ConfigSetOptions,
) -> Result<()> {
    let path = get_config_path()?;
    if let Some(err) = load_error {
        warn!(path = %path.display(), error = %err, "replacing unreadable config file settings");
    }

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Validates `value` and stores it under `key`.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let (section, field) = match key.split_once('.') {
        Some((section, field)) => (Some(section), field),
        None => (None, key),
    };

    match (section, field) {
        (None, "snapshot") => {
            config.snapshot = Some(PathBuf::from(value));
        }
        (Some("filters"), "ctr_names") => {
            let mode = value.parse::<CtrNamesMatch>().map_err(CommandError::Config)?;
            config.filters.ctr_names = Some(mode);
        }
        (Some("filters"), "workers") => {
            let workers = value
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=MAX_WORKERS).contains(n))
                .ok_or_else(|| {
                    CommandError::Config(format!(
                        "Invalid workers value '{}'. Use a number from 1 to {}",
                        value, MAX_WORKERS
                    ))
                })?;
            config.filters.workers = Some(workers);
        }
        (Some("output"), "color") => {
            config.output.color = Some(parse_bool(value)?);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: snapshot, filters.ctr_names, filters.workers, output.color",
                key
            )));
        }
    }
    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}
