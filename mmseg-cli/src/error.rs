//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// A dictionary could not be loaded
    DictionaryError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::DictionaryError(path) => write!(f, "Failed to load dictionary: {path}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("test.txt".to_string());
        assert_eq!(error.to_string(), "File not found: test.txt");
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_dictionary_error_display() {
        let error = CliError::DictionaryError("words.dic".to_string());
        assert_eq!(error.to_string(), "Failed to load dictionary: words.dic");
    }

    #[test]
    fn test_error_converts_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::ConfigError("bad mode".to_string()).into());
        let err = failure.unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: bad mode");
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_error_with_unicode_path() {
        let error = CliError::FileNotFound("语料/测试 文件.txt".to_string());
        assert_eq!(error.to_string(), "File not found: 语料/测试 文件.txt");
    }
}
