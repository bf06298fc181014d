//! Configuration management for the CLI.
//!
//! Read from `--config <path>`, else `~/.lineage/config.toml`, else built-in
//! defaults. Every table is optional:
//!
//! ```toml
//! dataset = "family.json"
//!
//! [chart]
//! type = "hourglass"
//! direction = "LR"
//! generations = 3
//!
//! [layout]
//! box_width = 200.0
//!
//! [kinship]
//! max_depth = 20
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use crate::error::{CliError, Result};
use lineage_chart::{ChartConfig, LayoutConfig};
use lineage_kinship::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dataset used when `--data` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Chart defaults
    #[serde(default)]
    pub chart: ChartConfig,

    /// Layout sizes
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Relationship search settings
    #[serde(default)]
    pub kinship: ResolverConfig,

    /// Output settings
    #[serde(default)]
    pub output: Settings,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lineage").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one the default path is used
    /// when present, and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = Self::path()?;
        if path.exists() {
            Self::from_file(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Read one configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_toml(&contents)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse configuration text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_chart::{ChartType, Direction};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.dataset.is_none());
        assert!(config.output.color);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.chart, ChartConfig::default());
        assert_eq!(config.kinship.max_depth, 15);
    }

    #[test]
    fn test_partial_tables() {
        let config = Config::from_toml(
            r#"
            dataset = "family.json"

            [chart]
            type = "hourglass"
            direction = "LR"

            [layout]
            box_width = 200.0

            [kinship]
            max_depth = 20

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.dataset, Some(PathBuf::from("family.json")));
        assert_eq!(config.chart.chart_type, ChartType::Hourglass);
        assert_eq!(config.chart.direction, Direction::LeftToRight);
        assert_eq!(config.chart.generations, 4);
        assert_eq!(config.layout.box_width, 200.0);
        assert_eq!(config.layout.box_height, 100.0);
        assert_eq!(config.kinship.max_depth, 20);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.color);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml("[chart]\ntype = \"pie\"");
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ncolor = false").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.output.color);

        let missing = Config::load(Some(Path::new("/nonexistent/lineage.toml")));
        assert!(matches!(missing, Err(CliError::Config(_))));
    }
}
