//! MMSeg command-line interface

use anyhow::Result;
use clap::Parser;
use mmseg_cli::commands::Commands;

/// Chinese word segmentation with the MMSeg algorithm
#[derive(Debug, Parser)]
#[command(name = "mmseg", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Segment(args) => args.execute(),
        Commands::List { subcommand } => {
            subcommand.execute();
            Ok(())
        }
    }
}
