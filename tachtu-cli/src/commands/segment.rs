//! Segment command implementation

use crate::config::{CliConfig, EngineKind};
use crate::error::CliResult;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{OutputFormat, OutputFormatter};
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tachtu_engine::{
    Engine, FixtureEngine, SegmentationOptions, TokenizeMode, Tokenizer, TokenizerConfig,
};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Texts to segment; without any, lines are read from --input or stdin
    #[arg(value_name = "TEXT", conflicts_with = "input")]
    pub texts: Vec<String>,

    /// Input files or patterns (supports glob), segmented line by line
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: tsv, or output.default_format from --config]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Segment URLs
    #[arg(short, long, conflicts_with = "host")]
    pub url: bool,

    /// Segment host names
    #[arg(long)]
    pub host: bool,

    /// Join the syllables of compound words with '_'
    #[arg(short = 't', long)]
    pub for_transforming: bool,

    /// Keep punctuation tokens
    #[arg(short, long)]
    pub keep_punctuation: bool,

    /// Dictionary directory
    #[arg(short, long, value_name = "PATH", env = "TACHTU_DICT_PATH")]
    pub dict_path: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Segmentation engine
    #[arg(short, long, value_enum)]
    pub engine: Option<EngineKind>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Settings after merging flags over the configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    /// Engine to build
    pub engine: EngineKind,
    /// Dictionary path and per-call options
    pub tokenizer: TokenizerConfig,
    /// Output format
    pub format: OutputFormat,
    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging();
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let settings = self.resolve(&config)?;
        log::info!(
            "Segmenting with the {} engine, mode {}",
            settings.engine,
            settings.tokenizer.options.mode
        );

        let lines = self.read_lines()?;
        let tokenizer = Tokenizer::from_config(build_engine(settings.engine)?, &settings.tokenizer)
            .context("Failed to initialize the tokenizer")?;

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout().lock()),
        };
        let mut formatter = settings.format.formatter(writer, settings.pretty_json);

        let count = segment_lines(
            &tokenizer,
            &lines,
            settings.tokenizer.options,
            formatter.as_mut(),
        )?;
        formatter.finish()?;
        log::info!("Segmented {count} lines");

        Ok(())
    }

    /// Merge command-line flags over `config`
    pub fn resolve(&self, config: &CliConfig) -> CliResult<ResolvedSettings> {
        let format = match self.format {
            Some(format) => format,
            None => config.output.format()?,
        };

        let mut tokenizer = config.tokenizer.clone();
        if let Some(path) = &self.dict_path {
            tokenizer.dict_path = path.clone();
        }
        tokenizer.options = self.options(tokenizer.options, format);

        Ok(ResolvedSettings {
            engine: self.engine.unwrap_or(config.engine),
            tokenizer,
            format,
            pretty_json: config.output.pretty_json,
        })
    }

    fn options(&self, base: SegmentationOptions, format: OutputFormat) -> SegmentationOptions {
        let mut options = base;
        if self.url {
            options = options.mode(TokenizeMode::Url);
        } else if self.host {
            options = options.mode(TokenizeMode::Host);
        }
        if self.for_transforming || format.needs_transforming() {
            options = options.for_transforming(true);
        }
        if self.keep_punctuation {
            options = options.keep_punctuation(true);
        }
        options
    }

    fn read_lines(&self) -> CliResult<Vec<String>> {
        if !self.texts.is_empty() {
            return Ok(self.texts.clone());
        }
        if !self.input.is_empty() {
            let mut lines = Vec::new();
            for path in resolve_patterns(&self.input)? {
                log::debug!("Reading {}", path.display());
                lines.extend(FileReader::read_lines(&path)?);
            }
            return Ok(lines);
        }
        FileReader::read_lines_from(io::stdin().lock())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when commands run in-process.
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Build the selected engine
pub fn build_engine(kind: EngineKind) -> CliResult<Box<dyn Engine>> {
    match kind {
        EngineKind::Whitespace => Ok(Box::new(FixtureEngine::new())),
        #[cfg(feature = "native")]
        EngineKind::Native => Ok(Box::new(tachtu_engine::NativeEngine::new())),
        #[cfg(not(feature = "native"))]
        EngineKind::Native => {
            Err(crate::error::CliError::EngineUnavailable(kind.to_string()).into())
        }
    }
}

/// Segment each line and hand its tokens to `formatter`
///
/// Returns the number of lines written.
pub fn segment_lines<E: Engine>(
    tokenizer: &Tokenizer<E>,
    lines: &[String],
    options: SegmentationOptions,
    formatter: &mut dyn OutputFormatter,
) -> CliResult<usize> {
    for (number, line) in lines.iter().enumerate() {
        let tokens = tokenizer
            .segment(line, options)
            .with_context(|| format!("Failed to segment line {}", number + 1))?;
        formatter.format_line(line, &tokens)?;
    }
    Ok(lines.len())
}
