//! Handle-based entry points
//!
//! [`Engine`] owns a frozen dictionary and hands out scanners. The
//! [`ScannerHandle`] API mirrors a C-style caller: tokens come back as
//! offset/length pairs, a zero length means end of stream, and the handle
//! may be destroyed any number of times.

use std::sync::Arc;

use crate::classify::{CharClassifier, DefaultClassifier};
use crate::config::EngineConfig;
use crate::dictionary::{Dictionary, SharedDictionary};
use crate::error::ConfigError;
use crate::rules::SegmentMode;
use crate::scanner::{Scanner, Token};

/// Offset/length pair returned by [`ScannerHandle::next_token`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawToken {
    /// Byte offset into the source
    pub offset: usize,
    /// Byte length, 0 only for end of stream
    pub length: usize,
}

impl RawToken {
    /// End-of-stream sentinel
    pub const END: RawToken = RawToken {
        offset: 0,
        length: 0,
    };

    /// Whether this is the end-of-stream sentinel
    pub fn is_end(&self) -> bool {
        self.length == 0
    }
}

impl From<Token<'_>> for RawToken {
    fn from(token: Token<'_>) -> Self {
        Self {
            offset: token.offset(),
            length: token.len(),
        }
    }
}

/// Segmentation engine over a read-only dictionary
#[derive(Debug, Clone)]
pub struct Engine<C: CharClassifier = DefaultClassifier> {
    dictionary: SharedDictionary,
    mode: SegmentMode,
    classifier: C,
}

impl Engine {
    /// Engine using the complex algorithm
    pub fn new(dictionary: impl Into<SharedDictionary>) -> Self {
        Self::with_classifier(dictionary, DefaultClassifier)
    }

    /// Build an engine from a configuration, loading its dictionaries
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let dictionary = config.dictionary.load()?;
        Ok(Self::new(dictionary).with_mode(config.mode))
    }
}

impl<C: CharClassifier> Engine<C> {
    /// Engine with a custom classification table
    pub fn with_classifier(dictionary: impl Into<SharedDictionary>, classifier: C) -> Self {
        Self {
            dictionary: dictionary.into(),
            mode: SegmentMode::default(),
            classifier,
        }
    }

    /// Switch the segmentation algorithm
    pub fn with_mode(mut self, mode: SegmentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Active algorithm
    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    /// The shared dictionary
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Another reference to the shared dictionary
    pub fn shared_dictionary(&self) -> SharedDictionary {
        Arc::clone(&self.dictionary)
    }

    /// Token iterator over `text`
    pub fn scan<'t>(&self, text: &'t [u8]) -> Scanner<'t, '_, C> {
        Scanner::with_options(&self.dictionary, text, self.mode, &self.classifier)
    }

    /// Allocate a scanner handle over a caller-owned buffer
    pub fn create_scanner<'t>(&self, text: &'t [u8]) -> ScannerHandle<'t, '_, C> {
        ScannerHandle {
            scanner: Some(self.scan(text)),
        }
    }

    /// Split a string into words
    pub fn segment<'t>(&self, text: &'t str) -> Vec<&'t str> {
        // Tokens of valid UTF-8 input always fall on character boundaries
        self.scan(text.as_bytes())
            .map(|token| &text[token.range()])
            .collect()
    }
}

/// Scanner slot released on end of stream or on destroy
#[derive(Debug)]
pub struct ScannerHandle<'t, 'd, C: CharClassifier = DefaultClassifier> {
    scanner: Option<Scanner<'t, 'd, C>>,
}

impl<'t, 'd, C: CharClassifier> ScannerHandle<'t, 'd, C> {
    /// Next token, or [`RawToken::END`] once the text is used up.
    ///
    /// The scanner is released when the sentinel is first returned.
    pub fn next_token(&mut self) -> RawToken {
        match self.scanner.as_mut().and_then(|scanner| scanner.next_token()) {
            Some(token) => token.into(),
            None => {
                if self.scanner.take().is_some() {
                    log::trace!("scanner handle released at end of stream");
                }
                RawToken::END
            }
        }
    }

    /// Release the scanner. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.scanner = None;
    }

    /// Whether the scanner has been released
    pub fn is_released(&self) -> bool {
        self.scanner.is_none()
    }
}
