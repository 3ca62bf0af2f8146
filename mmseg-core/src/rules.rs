//! Chunk disambiguation
//!
//! The complex MMSeg algorithm narrows the candidate chunks with four rules,
//! applied in order. Each rule keeps only the chunks that tie for the best
//! score; whatever survives the last rule is resolved by generation order.

use serde::{Deserialize, Serialize};

use crate::chunk::{Chunk, MAX_CHUNK_WORDS};

/// Scores closer than this compare equal
const EPSILON: f64 = 1e-9;

const SIMPLE_RULES: &[Rule] = &[Rule::MaximumMatching];
const COMPLEX_RULES: &[Rule] = &Rule::CASCADE;

/// One step of the disambiguation cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Largest total number of characters
    MaximumMatching,
    /// Largest average word length
    LargestAverageLength,
    /// Smallest variance of word lengths
    SmallestVariance,
    /// Largest sum of single-character freedom scores
    LargestFreedom,
}

impl Rule {
    /// The full cascade in application order
    pub const CASCADE: [Rule; 4] = [
        Rule::MaximumMatching,
        Rule::LargestAverageLength,
        Rule::SmallestVariance,
        Rule::LargestFreedom,
    ];

    /// Score where larger is better
    pub fn score(self, chunk: &Chunk) -> f64 {
        match self {
            Rule::MaximumMatching => chunk.length() as f64,
            Rule::LargestAverageLength => chunk.average_length(),
            Rule::SmallestVariance => -chunk.variance(),
            Rule::LargestFreedom => chunk.freedom(),
        }
    }

    /// Keep only the chunks tied for the best score, preserving order
    pub fn filter(self, chunks: &mut Vec<Chunk>) {
        let best = chunks
            .iter()
            .map(|c| self.score(c))
            .fold(f64::NEG_INFINITY, f64::max);
        chunks.retain(|c| best - self.score(c) <= EPSILON);
    }
}

/// Segmentation algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    /// Forward maximum matching: take the longest word at the cursor
    Simple,
    /// Three-word chunks resolved by the full rule cascade
    #[default]
    Complex,
}

impl SegmentMode {
    /// Words per chunk
    pub fn depth(self) -> usize {
        match self {
            SegmentMode::Simple => 1,
            SegmentMode::Complex => MAX_CHUNK_WORDS,
        }
    }

    /// Rules applied to the candidates
    pub fn rules(self) -> &'static [Rule] {
        match self {
            SegmentMode::Simple => SIMPLE_RULES,
            SegmentMode::Complex => COMPLEX_RULES,
        }
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            SegmentMode::Simple => "simple",
            SegmentMode::Complex => "complex",
        }
    }
}

/// Picks one chunk out of a candidate set
#[derive(Debug, Clone, Copy, Default)]
pub struct Disambiguator {
    mode: SegmentMode,
}

impl Disambiguator {
    /// Create a disambiguator for the given mode
    pub fn new(mode: SegmentMode) -> Self {
        Self { mode }
    }

    /// Active mode
    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    /// Select the winning chunk, `None` only for an empty candidate set
    pub fn select(&self, mut chunks: Vec<Chunk>) -> Option<Chunk> {
        for rule in self.mode.rules() {
            if chunks.len() <= 1 {
                break;
            }
            rule.filter(&mut chunks);
            log::trace!("{rule:?}: {} candidates left", chunks.len());
        }
        chunks.into_iter().next()
    }
}
