//! Chunk enumeration
//!
//! A chunk is a chain of up to three consecutive words that tile the text
//! starting at the cursor. Chunks only exist to pick the first word; the
//! scanner throws them away after every decision.

use smallvec::SmallVec;

use crate::classify::decode_at;
use crate::dictionary::{DictEntry, Dictionary};

/// Maximum number of words in a chunk
pub const MAX_CHUNK_WORDS: usize = 3;

/// A word placed in a chunk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordMatch {
    /// Length in bytes
    pub byte_len: usize,
    /// Length in characters
    pub length: usize,
    /// Freedom score, 0 for multi-character words and lone characters
    pub freedom: f64,
}

impl WordMatch {
    /// A character with no dictionary entry
    pub fn lone(byte_len: usize) -> Self {
        Self {
            byte_len,
            length: 1,
            freedom: 0.0,
        }
    }
}

impl From<&DictEntry> for WordMatch {
    fn from(entry: &DictEntry) -> Self {
        Self {
            byte_len: entry.byte_len(),
            length: entry.length(),
            freedom: entry.freedom(),
        }
    }
}

/// Candidate segmentation of the next few words
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chunk {
    words: SmallVec<[WordMatch; MAX_CHUNK_WORDS]>,
}

impl Chunk {
    /// Build a chunk from its words
    pub fn new(words: impl IntoIterator<Item = WordMatch>) -> Self {
        Self {
            words: words.into_iter().collect(),
        }
    }

    /// Words in text order
    pub fn words(&self) -> &[WordMatch] {
        &self.words
    }

    /// The word that will be emitted if this chunk wins
    pub fn first(&self) -> Option<&WordMatch> {
        self.words.first()
    }

    /// Number of words
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Total length in characters
    pub fn length(&self) -> usize {
        self.words.iter().map(|w| w.length).sum()
    }

    /// Total length in bytes
    pub fn byte_len(&self) -> usize {
        self.words.iter().map(|w| w.byte_len).sum()
    }

    /// Mean word length in characters
    pub fn average_length(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.length() as f64 / self.words.len() as f64
    }

    /// Population variance of the word lengths
    pub fn variance(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        let mean = self.average_length();
        let sum: f64 = self
            .words
            .iter()
            .map(|w| {
                let d = w.length as f64 - mean;
                d * d
            })
            .sum();
        sum / self.words.len() as f64
    }

    /// Sum of freedom scores over single-character words
    pub fn freedom(&self) -> f64 {
        self.words
            .iter()
            .filter(|w| w.length == 1)
            .map(|w| w.freedom)
            .sum()
    }
}

/// Enumerates chunks against a dictionary
#[derive(Debug, Clone, Copy)]
pub struct ChunkGenerator<'d> {
    dict: &'d Dictionary,
}

impl<'d> ChunkGenerator<'d> {
    /// Create a generator over a loaded dictionary
    pub fn new(dict: &'d Dictionary) -> Self {
        Self { dict }
    }

    /// Words that can start at `pos` without reaching past `end`.
    ///
    /// Falls back to the single character at `pos` when the dictionary has
    /// nothing, so the result is empty only when `pos` is not a character
    /// boundary inside `text[..end]`.
    pub fn words_at(&self, text: &[u8], pos: usize, end: usize) -> SmallVec<[WordMatch; 8]> {
        let mut words: SmallVec<[WordMatch; 8]> = self
            .dict
            .matches_at(text, pos, end)
            .map(WordMatch::from)
            .collect();
        if words.is_empty() {
            if let Some((_, width)) = decode_at(text, pos).filter(|&(_, w)| pos + w <= end) {
                words.push(WordMatch::lone(width));
            }
        }
        words
    }

    /// Every chunk of at most `depth` words starting at `pos`.
    ///
    /// `end` is the end of the word-script run; no word crosses it. A chain
    /// stops short of `depth` only when it reaches `end`. Chunks come out
    /// in a fixed order: shorter first words before longer ones.
    pub fn generate(&self, text: &[u8], pos: usize, end: usize, depth: usize) -> Vec<Chunk> {
        let depth = depth.clamp(1, MAX_CHUNK_WORDS);
        let mut chunks = Vec::new();
        let mut prefix = SmallVec::new();
        self.extend(text, pos, end, depth, &mut prefix, &mut chunks);
        chunks
    }

    fn extend(
        &self,
        text: &[u8],
        pos: usize,
        end: usize,
        depth: usize,
        prefix: &mut SmallVec<[WordMatch; MAX_CHUNK_WORDS]>,
        out: &mut Vec<Chunk>,
    ) {
        for word in self.words_at(text, pos, end) {
            prefix.push(word);
            let next = pos + word.byte_len;
            if next < end && prefix.len() < depth {
                self.extend(text, next, end, depth, prefix, out);
            } else {
                out.push(Chunk {
                    words: prefix.clone(),
                });
            }
            prefix.pop();
        }
    }
}
