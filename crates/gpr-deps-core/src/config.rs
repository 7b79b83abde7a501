//! Configuration types for gpr-deps.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::graph::EdgeMode;
use crate::reconcile::NoSourceAllowlist;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Report presentation.
    #[serde(default)]
    pub report: ReportConfig,

    /// Dependency analysis.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Edge collection mode selected by `analysis.single_file`.
    #[must_use]
    pub fn edge_mode(&self) -> EdgeMode {
        EdgeMode::from_single_file(self.analysis.single_file)
    }

    /// Parsed no-source allowlist.
    #[must_use]
    pub fn allowlist(&self) -> NoSourceAllowlist {
        NoSourceAllowlist::parse(&self.analysis.no_source_projects)
    }
}

/// Report presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Show the file dependencies explaining each project dependency.
    #[serde(default)]
    pub show_source: bool,

    /// Only show differences with the declared dependencies.
    #[serde(default = "default_true")]
    pub show_diff: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_source: false,
            show_diff: true,
        }
    }
}

/// Dependency analysis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Comma-separated names of projects that hold shared settings but no
    /// sources. They are never reported as removable.
    #[serde(default = "default_no_source_projects")]
    pub no_source_projects: String,

    /// Keep a single justifying file per dependency (faster) instead of all.
    #[serde(default = "default_true")]
    pub single_file: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            no_source_projects: default_no_source_projects(),
            single_file: true,
        }
    }
}

fn default_no_source_projects() -> String {
    "shared".to_string()
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
