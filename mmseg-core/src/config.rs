//! Engine configuration
//!
//! This module defines the TOML schema used to describe which dictionaries
//! to load and which algorithm to run:
//!
//! ```toml
//! mode = "complex"
//!
//! [dictionary]
//! data_dir = "/usr/share/mmseg"
//! chars = ["extra-chars.dic"]
//! words = ["extra-words.dic", "names.dic"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::error::ConfigError;
use crate::rules::SegmentMode;

/// Dictionary sources, loaded in order: data directory, characters, words
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Directory holding `chars.dic` and `words.dic`
    pub data_dir: Option<PathBuf>,
    /// Additional character dictionaries
    pub chars: Vec<PathBuf>,
    /// Additional word dictionaries
    pub words: Vec<PathBuf>,
}

impl DictionaryConfig {
    /// Whether no dictionary source is configured
    pub fn is_empty(&self) -> bool {
        self.data_dir.is_none() && self.chars.is_empty() && self.words.is_empty()
    }

    /// Build a dictionary from every configured source.
    ///
    /// Unlike [`Dictionary::load_chars`], any source that fails to load is
    /// an error here.
    pub fn load(&self) -> Result<Dictionary, ConfigError> {
        let mut dict = Dictionary::new();
        if let Some(dir) = &self.data_dir {
            dict.try_load_chars(&dir.join(crate::dictionary::CHARS_FILE))?;
            dict.try_load_words(&dir.join(crate::dictionary::WORDS_FILE))?;
        }
        for path in &self.chars {
            dict.try_load_chars(path)?;
        }
        for path in &self.words {
            dict.try_load_words(path)?;
        }
        log::debug!(
            "dictionary ready: {} entries ({} characters)",
            dict.len(),
            dict.char_count()
        );
        Ok(dict)
    }

    /// Rebase relative paths onto `base`
    pub fn resolve_relative(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(dir) = self.data_dir.as_mut() {
            resolve(dir);
        }
        self.chars.iter_mut().for_each(resolve);
        self.words.iter_mut().for_each(resolve);
    }
}

/// Root engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Segmentation algorithm
    pub mode: SegmentMode,
    /// Dictionary sources
    pub dictionary: DictionaryConfig,
}

impl EngineConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    ///
    /// Relative dictionary paths are resolved against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.dictionary.resolve_relative(base);
        }
        Ok(config)
    }

    /// Configuration with the given mode and no dictionaries
    pub fn with_mode(mode: SegmentMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}
