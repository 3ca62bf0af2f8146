//! Error types for the segmentation core
//!
//! Segmentation itself never fails. Errors only arise while loading
//! dictionaries and configuration from disk.

use std::path::PathBuf;
use thiserror::Error;

/// Dictionary loading errors
#[derive(Error, Debug)]
pub enum DictError {
    /// The dictionary file could not be read
    #[error("failed to read dictionary {}: {source}", path.display())]
    Io {
        /// Path of the dictionary file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file was readable but produced no usable entries
    #[error("dictionary {} contains no valid entries", path.display())]
    Empty {
        /// Path of the dictionary file
        path: PathBuf,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read configuration {}: {source}", path.display())]
    Io {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for the expected schema
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A dictionary named by the configuration failed to load
    #[error(transparent)]
    Dictionary(#[from] DictError),
}

/// Result type for dictionary operations
pub type Result<T> = std::result::Result<T, DictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_error_display() {
        let error = DictError::Empty {
            path: PathBuf::from("words.dic"),
        };
        assert_eq!(
            error.to_string(),
            "dictionary words.dic contains no valid entries"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let error = DictError::Io {
            path: PathBuf::from("/missing/chars.dic"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(error.to_string().contains("/missing/chars.dic"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_config_error_wraps_dictionary_error() {
        let error: ConfigError = DictError::Empty {
            path: PathBuf::from("chars.dic"),
        }
        .into();
        assert!(matches!(error, ConfigError::Dictionary(_)));
        assert!(error.to_string().contains("chars.dic"));
    }
}
