//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tachtu_engine::config::defaults;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration written to {}", self.output.display());
        println!("  Use it with: tachtu segment -c {} ...", self.output.display());

        Ok(())
    }
}

/// Commented configuration holding the default values
pub fn generate_template() -> String {
    format!(
        r#"# tachtu configuration

# Segmentation engine: "native" (needs dictionaries) or "whitespace"
# engine = "native"

[tokenizer]
# Directory holding the engine's dictionaries.
# {env} and --dict-path take precedence.
dict_path = "{dict_path}"

[tokenizer.options]
# "normal", "host" or "url"
mode = "normal"

# Join the syllables of compound words with '_'
for_transforming = false

# Keep punctuation tokens
keep_punctuation = false

[output]
# "tsv", "original", "verbose" or "json"
default_format = "tsv"

# Pretty print JSON output
pretty_json = true
"#,
        env = defaults::DICT_PATH_ENV,
        dict_path = defaults::DICT_PATH,
    )
}
