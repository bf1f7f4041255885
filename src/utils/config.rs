// Configuration utilities
// Author: Gabriel Demetrios Lafis

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::processing::{Collation, RankOrder, SortOptions};
use super::{parse_level, validate_range, AppError, AppResult};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub sort: SortConfig,
    pub display: DisplayConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Colour the level labels
    pub color: bool,
}

/// Sort configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Locale used to collate text, e.g. `fr_FR.UTF-8`; raw ordering when unset
    pub locale: Option<String>,
    /// Keep the type-rank partition ascending in descending sorts
    pub fixed_rank: bool,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub preview_rows: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            color: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { preview_rows: 5 }
    }
}

impl Config {
    /// Load configuration from a JSON or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        let config: Config = match extension.as_deref() {
            Some("json") => serde_json::from_str(&contents)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?,
            _ => {
                return Err(AppError::Config(format!(
                    "Unsupported config file format: {}",
                    path.display()
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot
    pub fn validate(&self) -> AppResult<()> {
        if parse_level(&self.logging.level).is_none() {
            return Err(AppError::Config(format!(
                "Unknown log level: {}",
                self.logging.level
            )));
        }

        validate_range(self.display.preview_rows, 1, 10_000, "display.preview_rows")
            .map_err(AppError::Config)
    }

    /// Get the log level filter
    pub fn log_level_filter(&self) -> log::LevelFilter {
        parse_level(&self.logging.level).unwrap_or(log::LevelFilter::Info)
    }

    /// Sort options selected by this configuration
    pub fn sort_options(&self) -> SortOptions {
        SortOptions {
            collation: self
                .sort
                .locale
                .as_deref()
                .map_or(Collation::Raw, Collation::locale),
            rank_order: if self.sort.fixed_rank {
                RankOrder::Fixed
            } else {
                RankOrder::Reversible
            },
        }
    }
}
