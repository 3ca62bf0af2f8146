//! MMSeg word segmentation for unsegmented Chinese text
//!
//! This crate implements the dictionary-driven maximum-matching family of
//! segmenters. At each position it enumerates every chain of up to three
//! dictionary words, narrows them with four heuristics, and emits the first
//! word of the winner.
//!
//! # Architecture
//!
//! - **Dictionary**: words bucketed by byte length, built once then shared
//! - **Chunk generation**: every tiling of the next three words
//! - **Disambiguation**: maximum matching, largest average word length,
//!   smallest variance, largest sum of single-character freedom
//! - **Scanner**: forward-only token stream covering every input byte
//!
//! # Example
//!
//! ```rust
//! use mmseg_core::{Dictionary, Engine};
//!
//! let mut dict = Dictionary::new();
//! dict.load_words_str("研究\n研究生\n生命\n起源\n");
//!
//! let engine = Engine::new(dict);
//! assert_eq!(
//!     engine.segment("研究生命起源, 2024"),
//!     vec!["研究", "生命", "起源", ",", " ", "2024"]
//! );
//! ```

pub mod chunk;
pub mod classify;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod rules;
pub mod scanner;

pub use chunk::{Chunk, ChunkGenerator, WordMatch, MAX_CHUNK_WORDS};
pub use classify::{CharClass, CharClassifier, DefaultClassifier};
pub use config::{DictionaryConfig, EngineConfig};
pub use dictionary::{DictEntry, Dictionary, SharedDictionary};
pub use engine::{Engine, RawToken, ScannerHandle};
pub use error::{ConfigError, DictError};
pub use rules::{Disambiguator, Rule, SegmentMode};
pub use scanner::{ScanState, Scanner, Token};
