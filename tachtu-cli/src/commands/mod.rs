//! CLI command implementations

use crate::config::EngineKind;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use std::io::{self, Write};
use tachtu_engine::TokenizeMode;

pub mod generate_config;
pub mod segment;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment Vietnamese text into words
    Segment(segment::SegmentArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a commented default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Segment(args) => args.execute(),
            Commands::List { subcommand } => subcommand.write_to(&mut io::stdout().lock()),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List tokenize modes
    Modes,

    /// List output formats
    Formats,

    /// List segmentation engines
    Engines,
}

impl ListCommands {
    /// Print the listing
    pub fn write_to(self, out: &mut impl Write) -> Result<()> {
        match self {
            ListCommands::Modes => {
                for mode in TokenizeMode::ALL {
                    let about = match mode {
                        TokenizeMode::Normal => "plain text",
                        TokenizeMode::Host => "host names, e.g. dantri.com.vn (--host)",
                        TokenizeMode::Url => "URLs, e.g. https://vnexpress.net/... (--url)",
                    };
                    writeln!(out, "{:<10} {about}", mode.name())?;
                }
            }
            ListCommands::Formats => {
                for format in OutputFormat::value_variants() {
                    writeln!(out, "{:<10} {}", format.name(), format.description())?;
                }
            }
            ListCommands::Engines => {
                for engine in EngineKind::value_variants() {
                    let about = match engine {
                        EngineKind::Native if cfg!(feature = "native") => "linked native engine",
                        EngineKind::Native => "linked native engine (not in this build)",
                        EngineKind::Whitespace => "whitespace splitter, no dictionaries needed",
                    };
                    writeln!(out, "{:<10} {about}", engine.to_string())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(command: ListCommands) -> String {
        let mut out = Vec::new();
        command.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_modes() {
        let out = listing(ListCommands::Modes);
        assert_eq!(out.lines().count(), 3);
        assert!(out.starts_with("normal"));
        assert!(out.contains("url"));
    }

    #[test]
    fn test_list_formats() {
        let out = listing(ListCommands::Formats);
        for name in ["tsv", "original", "verbose", "json"] {
            assert!(out.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_list_engines() {
        let out = listing(ListCommands::Engines);
        assert!(out.contains("whitespace"));
        assert!(out.contains("native"));
    }

    #[test]
    fn test_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Formats,
        };
        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Formats"));
    }
}
