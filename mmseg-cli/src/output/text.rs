//! Plain text output formatter

use super::{OutputFormatter, OutputToken};
use anyhow::Result;
use mmseg_core::CharClass;
use std::io::Write;

/// Plain text formatter - words joined by a delimiter.
///
/// Whitespace tokens are dropped except for their line breaks, so the
/// output keeps the line structure of the input.
pub struct TextFormatter<W: Write> {
    writer: W,
    delimiter: String,
    at_line_start: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, delimiter: impl Into<String>) -> Self {
        Self {
            writer,
            delimiter: delimiter.into(),
            at_line_start: true,
        }
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn begin_document(&mut self, _source: &str) -> Result<()> {
        self.at_line_start = true;
        Ok(())
    }

    fn format_token(&mut self, token: &OutputToken) -> Result<()> {
        if token.kind == CharClass::Whitespace {
            for _ in token.text.matches('\n') {
                writeln!(self.writer)?;
                self.at_line_start = true;
            }
            return Ok(());
        }
        if !self.at_line_start {
            self.writer.write_all(self.delimiter.as_bytes())?;
        }
        self.writer.write_all(token.text.as_bytes())?;
        self.at_line_start = false;
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        if !self.at_line_start {
            writeln!(self.writer)?;
            self.at_line_start = true;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
