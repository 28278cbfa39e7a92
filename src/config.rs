//! Configuration management and validation.
//!
//! Provides the parsing and export settings of a run. Settings are layered:
//! built-in defaults, then an optional TOML file, then environment
//! variables; CLI flags are applied last by the command layer.

use crate::app::services::flattener::{ExportStream, default_streams};
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DELIMITER, DEFAULT_OUTPUT_DIR, env_vars,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the table parser treats rows that break the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Every structural violation aborts the document
    #[default]
    Strict,
    /// Value-less rows and row-local violations are logged and dropped
    Tolerant,
}

impl std::str::FromStr for RowPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(RowPolicy::Strict),
            "tolerant" => Ok(RowPolicy::Tolerant),
            other => Err(Error::configuration(format!(
                "Unknown row policy '{}' (expected 'strict' or 'tolerant')",
                other
            ))),
        }
    }
}

/// Table parsing settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub row_policy: RowPolicy,
}

/// CSV export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving one CSV file per stream
    pub output_dir: PathBuf,

    /// Field delimiter, must be a single ASCII character
    pub delimiter: char,

    /// Emit summary Positions and parents of children
    pub include_summaries: bool,

    /// Export streams, each writing one file
    pub streams: Vec<ExportStream>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            delimiter: DEFAULT_DELIMITER,
            include_summaries: false,
            streams: default_streams(),
        }
    }
}

/// Complete configuration of a processing run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parsing: ParsingConfig,
    pub export: ExportConfig,
}

impl Config {
    /// Default location of the config file in the user's config directory
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine the user config directory"))
    }

    /// Read a TOML config file; missing sections take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file '{}'", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load defaults, then the config file (if any), then the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        debug!("Layered configuration: {:?}", config);
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production)
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(env_vars::OUTPUT_DIR).filter(|dir| !dir.trim().is_empty()) {
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(policy) = lookup(env_vars::ROW_POLICY) {
            self.parsing.row_policy = policy.parse()?;
        }

        if let Some(flag) = lookup(env_vars::INCLUDE_SUMMARIES) {
            self.export.include_summaries = parse_flag(env_vars::INCLUDE_SUMMARIES, &flag)?;
        }

        Ok(())
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if !self.export.delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Delimiter '{}' is not a single ASCII character",
                self.export.delimiter
            )));
        }

        if self.export.streams.is_empty() {
            return Err(Error::configuration("No export streams configured"));
        }

        let mut file_names = HashSet::new();
        for stream in &self.export.streams {
            if !file_names.insert(stream.file_name.as_str()) {
                return Err(Error::configuration(format!(
                    "Export file '{}' is used by more than one stream",
                    stream.file_name
                )));
            }

            if let Some(field) = stream.unsupported_fields().first() {
                return Err(Error::configuration(format!(
                    "Stream '{}' exports {} which {} tables do not have",
                    stream.name,
                    field.label(),
                    stream.layout
                )));
            }
        }

        Ok(())
    }

    /// Path of a stream's output file
    pub fn output_file(&self, stream: &ExportStream) -> PathBuf {
        self.export.output_dir.join(&stream.file_name)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::configuration(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}
