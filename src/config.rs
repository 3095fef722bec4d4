//! Settings file loading and validation
//!
//! Settings come from a TOML file merged with command-line overrides. All
//! three keys are required; validation reports every missing key at once and
//! runs before any file or database access.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::cli::Cli;

pub const DEFAULT_CONFIG_PATH: &str = "sheetload.toml";

/// Raw settings as they appear in the TOML file; every key optional so that
/// validation can report all gaps together.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub file_path: Option<PathBuf>,
    pub default_connection: Option<String>,
    pub table_name: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }
}

/// Validated run settings, assembled once at startup and passed by reference
/// into the pipeline.
#[derive(Debug, Clone)]
pub struct Settings {
    pub file_path: PathBuf,
    pub default_connection: String,
    pub table_name: String,
}

impl Settings {
    /// Merge the settings file with CLI overrides and validate.
    ///
    /// An explicit `--config` path must exist; the default path is only read
    /// when present, so a run can be driven entirely by flags.
    pub fn from_args(args: &Cli) -> Result<Self> {
        let config = match &args.config {
            Some(path) => Config::load(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Config::load(default)?
                } else {
                    Config::default()
                }
            }
        };
        Self::merge(config, args)
    }

    fn merge(config: Config, args: &Cli) -> Result<Self> {
        let file_path = args.file.clone().or(config.file_path);
        let default_connection = args.connection.clone().or(config.default_connection);
        let table_name = args.table.clone().or(config.table_name);

        let mut missing = Vec::new();
        if file_path.as_deref().is_none_or(|p| p.as_os_str().is_empty()) {
            missing.push("file_path is not set (set it in the settings file or pass --file)");
        }
        if default_connection.as_deref().is_none_or(|s| s.trim().is_empty()) {
            missing.push(
                "default_connection is not set (set it in the settings file or pass --connection)",
            );
        }
        if table_name.as_deref().is_none_or(|s| s.trim().is_empty()) {
            missing.push("table_name is not set (set it in the settings file or pass --table)");
        }
        if !missing.is_empty() {
            bail!("Missing required settings:\n  {}", missing.join("\n  "));
        }

        Ok(Settings {
            file_path: file_path.unwrap(),
            default_connection: default_connection.unwrap(),
            table_name: table_name.unwrap(),
        })
    }
}
