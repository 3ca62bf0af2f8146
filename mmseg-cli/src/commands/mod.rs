//! CLI command implementations

use clap::{Subcommand, ValueEnum};

pub mod segment;

pub use segment::{Mode, SegmentArgs};

use crate::output::OutputFormat;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment text files into words
    Segment(SegmentArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,

    /// List available segmentation modes
    Modes,
}

impl ListCommands {
    /// Print the requested listing to stdout
    pub fn execute(&self) {
        for line in self.lines() {
            println!("{line}");
        }
    }

    fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Formats => {
                let mut lines = vec!["Available output formats:".to_string()];
                lines.extend(describe::<OutputFormat>());
                lines
            }
            ListCommands::Modes => {
                let mut lines = vec!["Available segmentation modes:".to_string()];
                lines.extend(describe::<Mode>());
                lines
            }
        }
    }
}

fn describe<T: ValueEnum>() -> Vec<String> {
    T::value_variants()
        .iter()
        .filter_map(|variant| variant.to_possible_value())
        .map(|value| match value.get_help() {
            Some(help) => format!("  {:<8} - {help}", value.get_name()),
            None => format!("  {}", value.get_name()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_debug_format() {
        let segment_cmd = Commands::Segment(SegmentArgs {
            input: vec!["test.txt".to_string()],
            output: None,
            format: None,
            mode: Some(Mode::Simple),
            data_dir: None,
            chars: Vec::new(),
            words: Vec::new(),
            delimiter: None,
            config: None,
            parallel: false,
            quiet: false,
            verbose: 0,
        });

        let debug_str = format!("{:?}", segment_cmd);
        assert!(debug_str.contains("Segment"));
        assert!(debug_str.contains("test.txt"));

        let list_cmd = Commands::List {
            subcommand: ListCommands::Modes,
        };
        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Modes"));
    }

    #[test]
    fn test_list_formats() {
        let lines = ListCommands::Formats.lines();
        assert_eq!(lines[0], "Available output formats:");
        assert!(lines.iter().any(|l| l.trim_start().starts_with("text")));
        assert!(lines.iter().any(|l| l.trim_start().starts_with("json")));
        assert!(lines.iter().any(|l| l.trim_start().starts_with("tokens")));
    }

    #[test]
    fn test_list_modes() {
        let lines = ListCommands::Modes.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("complex"));
        assert!(lines[2].contains("simple"));
    }
}
