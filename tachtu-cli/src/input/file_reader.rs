//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::io::BufRead;
use std::path::Path;

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a file as UTF-8 lines, without line terminators
    pub fn read_lines(path: &Path) -> Result<Vec<String>> {
        Ok(Self::read_text(path)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Read all lines of a reader, such as stdin
    pub fn read_lines_from(reader: impl BufRead) -> Result<Vec<String>> {
        reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read input")
    }
}
