//! Character decoding and classification
//!
//! The scanner decodes one UTF-8 character at a time from a raw byte buffer
//! and asks a [`CharClassifier`] which token class it belongs to. Only
//! word-script characters are handed to the dictionary; every other class
//! is emitted without consulting it.

use serde::{Deserialize, Serialize};

/// Token classes produced by the scanner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    /// Script that is segmented with the dictionary (Han ideographs etc.)
    Word,
    /// ASCII digit
    Digit,
    /// ASCII letter
    Letter,
    /// Whitespace character
    Whitespace,
    /// Punctuation or symbol
    Punctuation,
    /// Byte that does not start a valid UTF-8 sequence
    Undecoded,
}

impl CharClass {
    /// Whether adjacent characters of this class are emitted as one token
    pub fn is_run(self) -> bool {
        matches!(
            self,
            CharClass::Digit | CharClass::Letter | CharClass::Whitespace
        )
    }

    /// Short lowercase name, as used in serialized output
    pub fn name(self) -> &'static str {
        match self {
            CharClass::Word => "word",
            CharClass::Digit => "digit",
            CharClass::Letter => "letter",
            CharClass::Whitespace => "whitespace",
            CharClass::Punctuation => "punctuation",
            CharClass::Undecoded => "undecoded",
        }
    }
}

/// Pluggable classification table
pub trait CharClassifier: Send + Sync {
    /// Classify a decoded character
    fn classify(&self, ch: char) -> CharClass;

    /// Check if the character is segmented with the dictionary
    fn is_word_script(&self, ch: char) -> bool {
        matches!(self.classify(ch), CharClass::Word)
    }
}

/// Default table: ASCII digits and letters form runs, any other
/// alphanumeric character is word script.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl CharClassifier for DefaultClassifier {
    fn classify(&self, ch: char) -> CharClass {
        if ch.is_ascii_digit() {
            CharClass::Digit
        } else if ch.is_ascii_alphabetic() {
            CharClass::Letter
        } else if ch.is_whitespace() {
            CharClass::Whitespace
        } else if !ch.is_ascii() && ch.is_alphanumeric() {
            CharClass::Word
        } else {
            CharClass::Punctuation
        }
    }
}

/// Expected sequence length for a UTF-8 leading byte, 0 if invalid
fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Decode the character starting at `pos`.
///
/// Returns the character and its byte length, or `None` when the bytes at
/// `pos` are not a complete, well-formed UTF-8 sequence.
pub fn decode_at(text: &[u8], pos: usize) -> Option<(char, usize)> {
    let first = *text.get(pos)?;
    let width = utf8_width(first);
    if width == 0 || pos + width > text.len() {
        return None;
    }
    let ch = std::str::from_utf8(&text[pos..pos + width])
        .ok()?
        .chars()
        .next()?;
    Some((ch, width))
}

/// Classify the character at `pos`, returning its class and byte length.
///
/// Malformed input is reported as a single [`CharClass::Undecoded`] byte.
pub fn classify_at<C: CharClassifier + ?Sized>(
    classifier: &C,
    text: &[u8],
    pos: usize,
) -> (CharClass, usize) {
    match decode_at(text, pos) {
        Some((ch, len)) => (classifier.classify(ch), len),
        None => (CharClass::Undecoded, 1),
    }
}

/// Byte offset where the maximal run of `class` starting at `pos` ends
pub fn run_end<C: CharClassifier + ?Sized>(
    classifier: &C,
    text: &[u8],
    pos: usize,
    class: CharClass,
) -> usize {
    let mut end = pos;
    while end < text.len() {
        match decode_at(text, end) {
            Some((ch, len)) if classifier.classify(ch) == class => end += len,
            _ => break,
        }
    }
    end
}
