//! Token scanner
//!
//! A [`Scanner`] walks one text from start to end exactly once. Word-script
//! runs are segmented with the dictionary; digits, letters and whitespace
//! come out as maximal runs; anything else is one token per character.
//! Every byte of the input lands in exactly one token.

use std::iter::FusedIterator;
use std::ops::Range;

use crate::chunk::ChunkGenerator;
use crate::classify::{classify_at, run_end, CharClass, CharClassifier, DefaultClassifier};
use crate::dictionary::Dictionary;
use crate::rules::{Disambiguator, SegmentMode};

/// One segment of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    offset: usize,
    bytes: &'t [u8],
    kind: CharClass,
}

impl<'t> Token<'t> {
    /// Byte offset into the source
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for emitted tokens
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte offset one past the end
    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }

    /// Byte range in the source
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Token class
    pub fn kind(&self) -> CharClass {
        self.kind
    }

    /// Raw bytes borrowed from the source
    pub fn as_bytes(&self) -> &'t [u8] {
        self.bytes
    }

    /// Token text, `None` for an undecoded byte
    pub fn as_str(&self) -> Option<&'t str> {
        std::str::from_utf8(self.bytes).ok()
    }
}

/// Scanner lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Tokens remain
    Active,
    /// End of input was reported; terminal
    Exhausted,
}

/// Forward-only tokenizer over one text
#[derive(Debug)]
pub struct Scanner<'t, 'd, C: CharClassifier + ?Sized = DefaultClassifier> {
    source: &'t [u8],
    cursor: usize,
    state: ScanState,
    generator: ChunkGenerator<'d>,
    disambiguator: Disambiguator,
    classifier: &'d C,
    /// Word-script run containing the cursor, reused until the cursor leaves it
    word_run: Range<usize>,
}

impl<'t, 'd> Scanner<'t, 'd> {
    /// Scanner using the complex algorithm and the default classification
    pub fn new(dict: &'d Dictionary, source: &'t [u8]) -> Self {
        Self::with_options(dict, source, SegmentMode::default(), &DefaultClassifier)
    }
}

impl<'t, 'd, C: CharClassifier + ?Sized> Scanner<'t, 'd, C> {
    /// Scanner with an explicit mode and classification table
    pub fn with_options(
        dict: &'d Dictionary,
        source: &'t [u8],
        mode: SegmentMode,
        classifier: &'d C,
    ) -> Self {
        Self {
            source,
            cursor: 0,
            state: ScanState::Active,
            generator: ChunkGenerator::new(dict),
            disambiguator: Disambiguator::new(mode),
            classifier,
            word_run: 0..0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Whether end of input has been reported
    pub fn is_exhausted(&self) -> bool {
        self.state == ScanState::Exhausted
    }

    /// Byte offset of the next token
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The text being scanned
    pub fn source(&self) -> &'t [u8] {
        self.source
    }

    /// Produce the next token, or `None` once the input is used up.
    ///
    /// After the first `None` every further call returns `None`.
    pub fn next_token(&mut self) -> Option<Token<'t>> {
        if self.state == ScanState::Exhausted {
            return None;
        }
        if self.cursor >= self.source.len() {
            self.state = ScanState::Exhausted;
            log::trace!("scanner exhausted after {} bytes", self.source.len());
            return None;
        }

        let start = self.cursor;
        let (kind, width) = classify_at(self.classifier, self.source, start);
        let len = match kind {
            CharClass::Word => self.word_len(start, width),
            kind if kind.is_run() => run_end(self.classifier, self.source, start, kind) - start,
            _ => width,
        };
        self.cursor = start + len;

        Some(Token {
            offset: start,
            bytes: &self.source[start..self.cursor],
            kind,
        })
    }

    fn word_len(&mut self, start: usize, width: usize) -> usize {
        if !self.word_run.contains(&start) {
            let end = run_end(self.classifier, self.source, start, CharClass::Word);
            self.word_run = start..end;
        }
        let chunks = self.generator.generate(
            self.source,
            start,
            self.word_run.end,
            self.disambiguator.mode().depth(),
        );
        self.disambiguator
            .select(chunks)
            .and_then(|chunk| chunk.first().map(|w| w.byte_len))
            .filter(|&len| len > 0)
            .unwrap_or(width)
    }
}

impl<'t, 'd, C: CharClassifier + ?Sized> Iterator for Scanner<'t, 'd, C> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl<'t, 'd, C: CharClassifier + ?Sized> FusedIterator for Scanner<'t, 'd, C> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment<'t>(dict: &Dictionary, text: &'t str) -> Vec<&'t str> {
        Scanner::new(dict, text.as_bytes())
            .map(|t| t.as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let dict = Dictionary::new();
        let mut scanner = Scanner::new(&dict, b"");
        assert_eq!(scanner.state(), ScanState::Active);
        assert!(scanner.next_token().is_none());
        assert!(scanner.is_exhausted());
    }

    #[test]
    fn test_non_word_runs_without_dictionary() {
        let dict = Dictionary::new();
        assert_eq!(segment(&dict, "123 abc!"), vec!["123", " ", "abc", "!"]);
    }

    #[test]
    fn test_token_kinds() {
        let dict = Dictionary::new();
        let kinds: Vec<CharClass> = Scanner::new(&dict, "12ab 中，".as_bytes())
            .map(|t| t.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                CharClass::Digit,
                CharClass::Letter,
                CharClass::Whitespace,
                CharClass::Word,
                CharClass::Punctuation,
            ]
        );
    }

    #[test]
    fn test_punctuation_is_per_character() {
        let dict = Dictionary::new();
        assert_eq!(segment(&dict, "!?，。"), vec!["!", "?", "，", "。"]);
    }

    #[test]
    fn test_maximum_matching_preference() {
        let mut dict = Dictionary::new();
        dict.add("研究", 0.0);
        dict.add("研究生", 0.0);
        let tokens = segment(&dict, "研究生物");
        assert_eq!(tokens[0], "研究生");
    }

    #[test]
    fn test_word_run_stops_at_other_classes() {
        let mut dict = Dictionary::new();
        dict.add("中国", 0.0);
        assert_eq!(segment(&dict, "中国2000年"), vec!["中国", "2000", "年"]);
    }

    #[test]
    fn test_offsets_are_contiguous() {
        let mut dict = Dictionary::new();
        dict.add("你好", 0.0);
        let text = "你好, world 世界";
        let mut expected = 0;
        for token in Scanner::new(&dict, text.as_bytes()) {
            assert_eq!(token.offset(), expected);
            assert!(!token.is_empty());
            expected = token.end();
        }
        assert_eq!(expected, text.len());
    }

    #[test]
    fn test_malformed_bytes_are_single_tokens() {
        let dict = Dictionary::new();
        let text = [b'a', 0xE4, 0xB8, b'b'];
        let tokens: Vec<Token> = Scanner::new(&dict, &text).collect();
        let lens: Vec<usize> = tokens.iter().map(Token::len).collect();
        assert_eq!(lens, vec![1, 1, 1, 1]);
        assert_eq!(tokens[1].kind(), CharClass::Undecoded);
        assert!(tokens[1].as_str().is_none());
    }

    #[test]
    fn test_exhaustion_is_terminal() {
        let dict = Dictionary::new();
        let mut scanner = Scanner::new(&dict, b"ab");
        assert!(scanner.next_token().is_some());
        assert!(scanner.next_token().is_none());
        assert!(scanner.next_token().is_none());
        assert_eq!(scanner.by_ref().count(), 0);
        assert_eq!(scanner.cursor(), 2);
    }

    #[test]
    fn test_custom_classifier() {
        struct AllWord;
        impl CharClassifier for AllWord {
            fn classify(&self, _ch: char) -> CharClass {
                CharClass::Word
            }
        }

        let mut dict = Dictionary::new();
        dict.add("ab", 0.0);
        let scanner = Scanner::with_options(&dict, b"abc", SegmentMode::Complex, &AllWord);
        let tokens: Vec<&[u8]> = scanner.map(|t| t.as_bytes()).collect();
        assert_eq!(tokens, vec![&b"ab"[..], &b"c"[..]]);
    }
}
