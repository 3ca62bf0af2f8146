//! Segment command implementation

use anyhow::{Context, Result};
use clap::Args;
use mmseg_core::{Dictionary, DictionaryConfig, Engine, SegmentMode};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader, InputSource};
use crate::output::{
    JsonFormatter, OutputFormat, OutputFormatter, OutputToken, TextFormatter, TokensFormatter,
};
use crate::progress::ProgressReporter;

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input files or patterns (supports glob, `-` reads stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Segmentation algorithm [default: complex]
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Directory holding chars.dic and words.dic
    #[arg(short, long, value_name = "DIR", env = "MMSEG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Additional character dictionary
    #[arg(long, value_name = "FILE")]
    pub chars: Vec<PathBuf>,

    /// Additional word dictionary
    #[arg(long, value_name = "FILE")]
    pub words: Vec<PathBuf>,

    /// Separator placed between words in text output [default: " "]
    #[arg(long, value_name = "STRING")]
    pub delimiter: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Segment input files in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Segmentation algorithm selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Three-word chunks with all four disambiguation rules
    Complex,
    /// Longest dictionary match at each position
    Simple,
}

impl From<Mode> for SegmentMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Complex => SegmentMode::Complex,
            Mode::Simple => SegmentMode::Simple,
        }
    }
}

/// All tokens of one input
#[derive(Debug)]
pub struct SegmentedDocument {
    /// Display name of the input
    pub source: String,
    /// Tokens in input order
    pub tokens: Vec<OutputToken>,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting segmentation");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let mode = self
            .mode
            .map(SegmentMode::from)
            .unwrap_or(config.segmentation.mode);
        let format = self.format.unwrap_or(config.output.format);
        let delimiter = self
            .delimiter
            .clone()
            .unwrap_or_else(|| config.output.delimiter.clone());

        let dictionary = self.build_dictionary(&config.dictionary)?;
        let engine = Engine::new(dictionary).with_mode(mode);
        log::info!("Using {} mode", mode.name());

        let sources = self.resolve_inputs()?;
        log::info!("Found {} input(s) to segment", sources.len());

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_inputs(sources.len() as u64);

        let documents = if self.parallel && sources.len() > 1 {
            sources
                .par_iter()
                .map(|source| segment_source(&engine, source, &progress))
                .collect::<Result<Vec<_>>>()?
        } else {
            sources
                .iter()
                .map(|source| segment_source(&engine, source, &progress))
                .collect::<Result<Vec<_>>>()?
        };
        let totals = progress.finish();
        log::info!(
            "Segmented {} input(s): {} tokens from {} bytes",
            totals.inputs,
            totals.tokens,
            totals.bytes
        );

        let writer = self.open_output()?;
        let mut formatter = create_formatter(format, writer, &delimiter, config.output.pretty_json);
        write_documents(formatter.as_mut(), &documents)?;

        log::info!("Segmentation complete");
        Ok(())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .context("Failed to initialize logging")?;
        }

        Ok(())
    }

    /// Merge command-line dictionary sources into the configured ones.
    ///
    /// Command-line files are appended to those from the config file. A
    /// data directory given on the command line replaces the configured one.
    fn dictionary_sources(&self, config: &DictionaryConfig) -> DictionaryConfig {
        DictionaryConfig {
            data_dir: self.data_dir.clone().or_else(|| config.data_dir.clone()),
            chars: config.chars.iter().chain(&self.chars).cloned().collect(),
            words: config.words.iter().chain(&self.words).cloned().collect(),
        }
    }

    fn build_dictionary(&self, config: &DictionaryConfig) -> Result<Dictionary> {
        let sources = self.dictionary_sources(config);
        let dict = sources
            .load()
            .with_context(|| CliError::DictionaryError(describe_sources(&sources)))?;

        if dict.is_empty() {
            log::warn!("No dictionary loaded; every word character becomes its own token");
        } else {
            log::info!(
                "Dictionary loaded: {} entries ({} characters)",
                dict.len(),
                dict.char_count()
            );
        }

        Ok(dict)
    }

    fn resolve_inputs(&self) -> Result<Vec<InputSource>> {
        let mut sources = Vec::new();
        if self.input.iter().any(|i| i == "-") {
            sources.push(InputSource::Stdin);
        }

        let patterns: Vec<String> = self.input.iter().filter(|i| *i != "-").cloned().collect();
        if !patterns.is_empty() {
            sources.extend(resolve_patterns(&patterns)?.into_iter().map(InputSource::File));
        }

        Ok(sources)
    }

    fn open_output(&self) -> Result<Box<dyn Write + Send>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(BufWriter::new(io::stdout()))),
        }
    }
}

fn describe_sources(sources: &DictionaryConfig) -> String {
    sources
        .data_dir
        .iter()
        .chain(&sources.chars)
        .chain(&sources.words)
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Segment one input into owned tokens
pub fn segment_source(
    engine: &Engine,
    source: &InputSource,
    progress: &ProgressReporter,
) -> Result<SegmentedDocument> {
    let bytes = match source {
        InputSource::Stdin => FileReader::read_stdin()?,
        InputSource::File(path) => FileReader::read_bytes(path)?,
    };
    log::debug!("Segmenting {} ({} bytes)", source.name(), bytes.len());

    let tokens: Vec<OutputToken> = engine
        .scan(&bytes)
        .map(|token| OutputToken::from_token(&token))
        .collect();

    progress.input_segmented(&source.name(), bytes.len(), tokens.len());
    Ok(SegmentedDocument {
        source: source.name(),
        tokens,
    })
}

/// Build the formatter for `format` writing to `writer`
pub fn create_formatter<'w>(
    format: OutputFormat,
    writer: Box<dyn Write + Send + 'w>,
    delimiter: &str,
    pretty_json: bool,
) -> Box<dyn OutputFormatter + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, delimiter)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Tokens => Box::new(TokensFormatter::new(writer)),
    }
}

/// Stream every document through `formatter`
pub fn write_documents(
    formatter: &mut dyn OutputFormatter,
    documents: &[SegmentedDocument],
) -> Result<()> {
    for document in documents {
        formatter.begin_document(&document.source)?;
        for token in &document.tokens {
            formatter.format_token(token)?;
        }
        formatter.end_document()?;
    }
    formatter.finish()
}
