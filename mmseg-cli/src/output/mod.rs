//! Output formatting module

use anyhow::Result;
use mmseg_core::{CharClass, Token};
use serde::{Deserialize, Serialize};

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Start a new input document
    fn begin_document(&mut self, source: &str) -> Result<()>;

    /// Format and output a single token
    fn format_token(&mut self, token: &OutputToken) -> Result<()>;

    /// Close the current document
    fn end_document(&mut self) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// A token detached from its input buffer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputToken {
    /// Token text, undecodable bytes replaced with U+FFFD
    pub text: String,
    /// Byte offset in the input
    pub offset: usize,
    /// Byte length in the input, which may differ from `text.len()`
    pub length: usize,
    /// Token class
    pub kind: CharClass,
}

impl OutputToken {
    /// Copy a scanner token out of its source
    pub fn from_token(token: &Token<'_>) -> Self {
        Self {
            text: String::from_utf8_lossy(token.as_bytes()).into_owned(),
            offset: token.offset(),
            length: token.len(),
            kind: token.kind(),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Words separated by a delimiter, line breaks preserved
    Text,
    /// JSON array of documents with token metadata
    Json,
    /// One token per line with offset, length and class
    Tokens,
}

pub mod json;
pub mod text;
pub mod tokens;

pub use json::JsonFormatter;
pub use text::TextFormatter;
pub use tokens::TokensFormatter;
