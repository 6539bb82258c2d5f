use anyhow::Result;
use clap::Parser;
use tachtu_cli::commands::Commands;

/// Vietnamese word segmentation
#[derive(Debug, Parser)]
#[command(name = "tachtu", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    Cli::parse().command.execute()
}
