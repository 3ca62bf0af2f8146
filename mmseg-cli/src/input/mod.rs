//! Input handling module

use std::path::PathBuf;

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

/// Where a document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input, named `-`
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Display name used in output and progress messages
    pub fn name(&self) -> String {
        match self {
            InputSource::Stdin => "-".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}
