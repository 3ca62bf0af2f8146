//! Progress reporting module
//!
//! Counts segmented inputs on a progress bar and keeps running byte and
//! token totals. Updates arrive from rayon workers, so the totals are
//! atomics behind a shared reference.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Running totals over every segmented input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentTotals {
    /// Inputs finished
    pub inputs: usize,
    /// Source bytes consumed
    pub bytes: usize,
    /// Tokens emitted
    pub tokens: usize,
}

/// Progress reporter for segmentation runs
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
    inputs: AtomicUsize,
    bytes: AtomicUsize,
    tokens: AtomicUsize,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
            inputs: AtomicUsize::new(0),
            bytes: AtomicUsize::new(0),
            tokens: AtomicUsize::new(0),
        }
    }

    /// Show a bar over `total_inputs` inputs
    pub fn init_inputs(&mut self, total_inputs: u64) {
        if self.quiet {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} inputs {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");

        let pb = ProgressBar::new(total_inputs);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Record one segmented input
    pub fn input_segmented(&self, name: &str, bytes: usize, tokens: usize) {
        self.inputs.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
        self.tokens.fetch_add(tokens, Ordering::Relaxed);

        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{name}: {tokens} tokens from {bytes} bytes"));
            pb.inc(1);
        }
    }

    /// Totals recorded so far
    pub fn totals(&self) -> SegmentTotals {
        SegmentTotals {
            inputs: self.inputs.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
            tokens: self.tokens.load(Ordering::Relaxed),
        }
    }

    /// Finish progress reporting and return the totals
    pub fn finish(&self) -> SegmentTotals {
        let totals = self.totals();
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "{} tokens from {} bytes",
                totals.tokens, totals.bytes
            ));
        }
        totals
    }

    /// Whether a progress bar is being drawn
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }
}
