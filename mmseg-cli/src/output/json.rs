//! JSON output formatter

use super::{OutputFormatter, OutputToken};
use anyhow::Result;
use mmseg_core::CharClass;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs documents and their tokens as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<DocumentData>,
    pretty: bool,
}

/// One segmented input
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentData {
    /// Input file name, or `-` for stdin
    pub source: String,
    /// Tokens in text order
    pub tokens: Vec<TokenData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenData {
    /// The token text
    pub text: String,
    /// Starting byte offset in the original text
    pub offset: usize,
    /// Length of the token in bytes
    pub length: usize,
    /// Token class
    pub kind: CharClass,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            documents: Vec::new(),
            pretty,
        }
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn begin_document(&mut self, source: &str) -> Result<()> {
        self.documents.push(DocumentData {
            source: source.to_string(),
            tokens: Vec::new(),
        });
        Ok(())
    }

    fn format_token(&mut self, token: &OutputToken) -> Result<()> {
        let Some(document) = self.documents.last_mut() else {
            anyhow::bail!("token written outside of a document");
        };
        document.tokens.push(TokenData {
            text: token.text.clone(),
            offset: token.offset,
            length: token.length,
            kind: token.kind,
        });
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.documents)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
