//! Token listing formatter

use super::{OutputFormatter, OutputToken};
use anyhow::Result;
use std::io::Write;

/// One token per line: `offset<TAB>length<TAB>kind<TAB>text`
///
/// The text is escaped so that whitespace tokens stay on one line.
pub struct TokensFormatter<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> TokensFormatter<W> {
    /// Create a new token listing formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }
}

impl<W: Write + Send> OutputFormatter for TokensFormatter<W> {
    fn begin_document(&mut self, source: &str) -> Result<()> {
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        self.documents += 1;
        writeln!(self.writer, "# {source}")?;
        Ok(())
    }

    fn format_token(&mut self, token: &OutputToken) -> Result<()> {
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}",
            token.offset,
            token.length,
            token.kind.name(),
            token.text.escape_debug()
        )?;
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmseg_core::CharClass;

    fn token(text: &str, offset: usize, length: usize, kind: CharClass) -> OutputToken {
        OutputToken {
            text: text.to_string(),
            offset,
            length,
            kind,
        }
    }

    #[test]
    fn test_token_lines() {
        let mut buf = Vec::new();
        {
            let mut formatter = TokensFormatter::new(&mut buf);
            formatter.begin_document("-").unwrap();
            formatter
                .format_token(&token("中国", 0, 6, CharClass::Word))
                .unwrap();
            formatter
                .format_token(&token("\n", 6, 1, CharClass::Whitespace))
                .unwrap();
            formatter.finish().unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "# -\n0\t6\tword\t中国\n6\t1\twhitespace\t\\n\n");
    }

    #[test]
    fn test_undecoded_byte_keeps_source_length() {
        let mut buf = Vec::new();
        {
            let mut formatter = TokensFormatter::new(&mut buf);
            formatter.begin_document("-").unwrap();
            formatter
                .format_token(&token("\u{FFFD}", 0, 1, CharClass::Undecoded))
                .unwrap();
            formatter.finish().unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("0\t1\tundecoded\t\u{FFFD}"));
    }
}
