//! Dictionary store
//!
//! Entries are bucketed by their UTF-8 byte length so that the chunk
//! generator can probe every candidate length at a text position with a
//! single hash lookup per bucket.
//!
//! A dictionary is built mutably (`load_*`, [`Dictionary::add`]) and then
//! shared read-only, typically through [`Dictionary::into_shared`]. Nothing
//! in the segmentation path takes `&mut Dictionary`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{DictError, Result};

/// File name of the character dictionary inside a data directory
pub const CHARS_FILE: &str = "chars.dic";
/// File name of the word dictionary inside a data directory
pub const WORDS_FILE: &str = "words.dic";

/// Read-only dictionary shared between scanners
pub type SharedDictionary = Arc<Dictionary>;

/// A single dictionary word
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    word: Box<str>,
    length: usize,
    freedom: f64,
}

impl DictEntry {
    /// Create an entry; `length` is derived from the word's characters.
    ///
    /// The freedom score only applies to single-character words and is
    /// forced to 0 for longer ones.
    pub fn new(word: &str, freedom: f64) -> Self {
        let length = word.chars().count();
        let freedom = if length == 1 && freedom.is_finite() {
            freedom
        } else {
            0.0
        };
        Self {
            word: word.into(),
            length,
            freedom,
        }
    }

    /// The word text
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The word bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.word.as_bytes()
    }

    /// Number of characters
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of bytes
    pub fn byte_len(&self) -> usize {
        self.word.len()
    }

    /// Morphemic-freedom score (0 for multi-character words)
    pub fn freedom(&self) -> f64 {
        self.freedom
    }
}

/// Word dictionary bucketed by byte length
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    buckets: BTreeMap<usize, HashMap<Box<[u8]>, DictEntry>>,
    entries: usize,
    chars: usize,
}

/// Outcome of parsing one dictionary source
#[derive(Debug, Default)]
struct Parsed {
    entries: Vec<DictEntry>,
    skipped: usize,
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the dictionary for sharing between scanners
    pub fn into_shared(self) -> SharedDictionary {
        Arc::new(self)
    }

    /// Load a character dictionary, returning whether it succeeded.
    ///
    /// On failure the dictionary is left exactly as it was.
    pub fn load_chars(&mut self, path: impl AsRef<Path>) -> bool {
        report(path.as_ref(), self.try_load_chars(path.as_ref()))
    }

    /// Load a word dictionary, returning whether it succeeded.
    ///
    /// On failure the dictionary is left exactly as it was.
    pub fn load_words(&mut self, path: impl AsRef<Path>) -> bool {
        report(path.as_ref(), self.try_load_words(path.as_ref()))
    }

    /// Load `chars.dic` and `words.dic` from a data directory.
    ///
    /// Both files are attempted even if the first one fails.
    pub fn load_defaults(&mut self, dir: impl AsRef<Path>) -> bool {
        let dir = dir.as_ref();
        let chars = self.load_chars(dir.join(CHARS_FILE));
        let words = self.load_words(dir.join(WORDS_FILE));
        chars && words
    }

    /// Load a character dictionary, returning the number of entries added
    pub fn try_load_chars(&mut self, path: &Path) -> Result<usize> {
        let bytes = read_file(path)?;
        let parsed = parse_lines(&bytes, parse_char_line);
        self.commit(path, parsed, "character")
    }

    /// Load a word dictionary, returning the number of entries added
    pub fn try_load_words(&mut self, path: &Path) -> Result<usize> {
        let bytes = read_file(path)?;
        let parsed = parse_lines(&bytes, parse_word_line);
        self.commit(path, parsed, "word")
    }

    /// Parse character entries from in-memory text
    pub fn load_chars_str(&mut self, text: &str) -> usize {
        let parsed = parse_lines(text.as_bytes(), parse_char_line);
        self.insert_all(parsed.entries)
    }

    /// Parse word entries from in-memory text
    pub fn load_words_str(&mut self, text: &str) -> usize {
        let parsed = parse_lines(text.as_bytes(), parse_word_line);
        self.insert_all(parsed.entries)
    }

    /// Add one word. Returns false for an empty word.
    pub fn add(&mut self, word: &str, freedom: f64) -> bool {
        if word.is_empty() {
            return false;
        }
        self.insert(DictEntry::new(word, freedom));
        true
    }

    /// Look up an exact word
    pub fn get(&self, word: &[u8]) -> Option<&DictEntry> {
        self.buckets.get(&word.len())?.get(word)
    }

    /// Look up the `byte_len` bytes at `offset` in `text`
    pub fn lookup_at(&self, text: &[u8], offset: usize, byte_len: usize) -> Option<&DictEntry> {
        let end = offset.checked_add(byte_len)?;
        self.get(text.get(offset..end)?)
    }

    /// Whether the word is present
    pub fn contains(&self, word: &str) -> bool {
        self.get(word.as_bytes()).is_some()
    }

    /// Freedom score of a single-character word, 0 if absent
    pub fn freedom(&self, word: &str) -> f64 {
        self.get(word.as_bytes()).map_or(0.0, DictEntry::freedom)
    }

    /// Every entry that matches the bytes at `offset` without reaching
    /// past `limit`, shortest first
    pub fn matches_at<'a>(
        &'a self,
        text: &'a [u8],
        offset: usize,
        limit: usize,
    ) -> impl Iterator<Item = &'a DictEntry> + 'a {
        let room = limit.min(text.len()).saturating_sub(offset);
        self.buckets
            .range(..=room)
            .filter_map(move |(&len, bucket)| bucket.get(&text[offset..offset + len]))
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Whether no entries are loaded
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of single-character entries
    pub fn char_count(&self) -> usize {
        self.chars
    }

    /// Byte length of the longest entry
    pub fn max_byte_len(&self) -> usize {
        self.buckets.keys().next_back().copied().unwrap_or(0)
    }

    fn commit(&mut self, path: &Path, parsed: Parsed, kind: &str) -> Result<usize> {
        if parsed.entries.is_empty() {
            return Err(DictError::Empty {
                path: path.to_path_buf(),
            });
        }
        let skipped = parsed.skipped;
        let added = self.insert_all(parsed.entries);
        log::info!(
            "loaded {added} {kind} entries from {} ({skipped} lines skipped)",
            path.display()
        );
        Ok(added)
    }

    fn insert_all(&mut self, entries: Vec<DictEntry>) -> usize {
        let count = entries.len();
        for entry in entries {
            self.insert(entry);
        }
        count
    }

    fn insert(&mut self, entry: DictEntry) {
        let single = entry.length() == 1;
        let key: Box<[u8]> = entry.as_bytes().into();
        let bucket = self.buckets.entry(key.len()).or_default();
        if bucket.insert(key, entry).is_none() {
            self.entries += 1;
            if single {
                self.chars += 1;
            }
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| DictError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn report(path: &Path, result: Result<usize>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            log::warn!("dictionary {} not loaded: {e}", path.display());
            false
        }
    }
}

fn parse_lines(bytes: &[u8], parse: fn(&str) -> Option<DictEntry>) -> Parsed {
    let mut parsed = Parsed::default();
    for (idx, raw) in bytes.split(|&b| b == b'\n').enumerate() {
        let Ok(line) = std::str::from_utf8(raw) else {
            log::debug!("line {}: invalid UTF-8, skipped", idx + 1);
            parsed.skipped += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse(line) {
            Some(entry) => parsed.entries.push(entry),
            None => {
                log::debug!("line {}: malformed entry {line:?}, skipped", idx + 1);
                parsed.skipped += 1;
            }
        }
    }
    parsed
}

fn is_single_char(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Degree of morphemic freedom from a raw corpus frequency
fn freedom_from_frequency(freq: u64) -> f64 {
    if freq > 1 {
        (freq as f64).ln()
    } else {
        0.0
    }
}

/// `<char> <freedom>`, or the legacy `<frequency> <char>`
fn parse_char_line(line: &str) -> Option<DictEntry> {
    let mut fields = line.split_whitespace();
    let first = fields.next()?;
    let second = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    if is_single_char(first) {
        if let Ok(freedom) = second.parse::<f64>() {
            if freedom.is_finite() {
                return Some(DictEntry::new(first, freedom));
            }
        }
    }
    if is_single_char(second) {
        if let Ok(freq) = first.parse::<u64>() {
            return Some(DictEntry::new(second, freedom_from_frequency(freq)));
        }
    }
    None
}

/// `<word>`, or the legacy `<char-count> <word>`
fn parse_word_line(line: &str) -> Option<DictEntry> {
    let mut fields = line.split_whitespace();
    let first = fields.next()?;
    let word = match (fields.next(), fields.next()) {
        (None, _) => first,
        (Some(word), None) if first.parse::<usize>().is_ok() => word,
        _ => return None,
    };
    if word.chars().nth(1).is_none() {
        return None;
    }
    Some(DictEntry::new(word, 0.0))
}
