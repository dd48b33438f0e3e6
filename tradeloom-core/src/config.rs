//! Dashboard configuration, read from TOML.
//!
//! Every field has a default matching the published Ministry of Trade,
//! Industry and Energy textile file, so an empty file (or no file) is a valid
//! configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::loader::resolve_encoding;

/// Default file name of the published statistics file.
pub const DEFAULT_DATA_PATH: &str = "산업통상부_섬유산업 수출입 현황_20241231.csv";

/// Errors from reading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Names of the columns the summary cards and the comparison chart read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackedColumns {
    pub export: String,
    pub export_yoy: String,
    pub import: String,
    pub import_yoy: String,
    pub balance: String,
    pub export_share: String,
    pub total_export: String,
}

impl Default for TrackedColumns {
    fn default() -> Self {
        Self {
            export: "섬유산업수출금액(백만불)".into(),
            export_yoy: "섬유산업수출증감(전년대비_퍼센트)".into(),
            import: "섬유산업수입금액(백만불)".into(),
            import_yoy: "섬유산업수입증감(전년대비_퍼센트)".into(),
            balance: "섬유산업무역수지(백만불)".into(),
            export_share: "섬유산업수출비중(전년대비_퍼센트)".into(),
            total_export: "전체산업수출금액(백만불)".into(),
        }
    }
}

impl TrackedColumns {
    fn all(&self) -> [(&'static str, &str); 7] {
        [
            ("export", self.export.as_str()),
            ("export_yoy", self.export_yoy.as_str()),
            ("import", self.import.as_str()),
            ("import_yoy", self.import_yoy.as_str()),
            ("balance", self.balance.as_str()),
            ("export_share", self.export_share.as_str()),
            ("total_export", self.total_export.as_str()),
        ]
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Statistics file, relative to the working directory.
    pub data_path: PathBuf,
    /// Text encoding label of the statistics file.
    pub encoding: String,
    pub year_column: String,
    /// Metric column selected when nothing else is chosen. Clamped to the
    /// last column for narrower files.
    pub default_column_index: usize,
    /// Bundled font file for chart text.
    pub font_file: Option<PathBuf>,
    pub columns: TrackedColumns,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            encoding: "cp949".into(),
            year_column: "연도".into(),
            default_column_index: 5,
            font_file: None,
            columns: TrackedColumns::default(),
        }
    }
}

impl DashboardConfig {
    /// Load and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Look for `config.toml` under the platform config directory.
    pub fn default_location(config_dir: Option<PathBuf>) -> Option<PathBuf> {
        config_dir.map(|dir| dir.join("tradeloom").join("config.toml"))
    }

    /// Resolve the configuration for a binary: an explicit path must exist;
    /// otherwise the per-user file is read when present; otherwise defaults.
    pub fn load(explicit: Option<&Path>, config_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_location(config_dir) {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "using per-user config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        resolve_encoding(&self.encoding)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.year_column.trim().is_empty() {
            return Err(ConfigError::Invalid("year_column must not be empty".into()));
        }

        for (key, name) in self.columns.all() {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "columns.{key} must not be empty"
                )));
            }
            if name == self.year_column {
                return Err(ConfigError::Invalid(format!(
                    "columns.{key} cannot be the year column"
                )));
            }
        }

        Ok(())
    }
}
