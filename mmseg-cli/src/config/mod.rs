//! Configuration module
//!
//! The CLI reads an optional TOML file. Command-line flags override the
//! values found there.
//!
//! ```toml
//! [segmentation]
//! mode = "simple"
//!
//! [dictionary]
//! data_dir = "data"
//! words = ["names.dic"]
//!
//! [output]
//! format = "json"
//! pretty_json = false
//! ```

use anyhow::{Context, Result};
use mmseg_core::{DictionaryConfig, SegmentMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CliError;
use crate::output::OutputFormat;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Segmentation configuration
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Dictionary sources
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Segmentation-related configuration
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Default segmentation algorithm
    pub mode: SegmentMode,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Separator between words in text output
    pub delimiter: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            delimiter: " ".to_string(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative dictionary paths are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: CliConfig = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {}", path.display(), e)))?;

        if let Some(base) = path.parent() {
            config.dictionary.resolve_relative(base);
        }
        log::debug!("Loaded configuration from {}", path.display());

        Ok(config)
    }
}
