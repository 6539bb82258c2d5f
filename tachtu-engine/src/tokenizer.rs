//! Tokenizer facade: segment, decode, release

use crate::buffer::ResultBuffer;
use crate::config::TokenizerConfig;
use crate::error::{Result, TokenizerError};
use crate::gateway::{Engine, SegmentRequest};
use std::ffi::CString;
use std::path::{Path, PathBuf};
use tachtu_core::{tokens_to_strings, LayoutViolation, SegmentationOptions, Token};

/// An initialized engine plus its default options
///
/// Constructing a `Tokenizer` is the initialization step: there is no way to
/// segment with an engine whose dictionaries failed to load. One tokenizer
/// can serve concurrent callers when the engine is `Sync`; every call owns
/// its own result buffer.
#[derive(Debug)]
pub struct Tokenizer<E: Engine> {
    engine: E,
    dict_path: PathBuf,
    default_options: SegmentationOptions,
}

impl<E: Engine> Tokenizer<E> {
    /// Load dictionaries from `dict_path`
    ///
    /// # Errors
    ///
    /// [`TokenizerError::InitFailed`] if the engine reports a negative status.
    /// The failure is final for this engine; dictionaries do not change
    /// between attempts.
    pub fn initialize(engine: E, dict_path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(
            engine,
            &TokenizerConfig::default().with_dict_path(dict_path.as_ref()),
        )
    }

    /// Load dictionaries and default options from a configuration
    pub fn from_config(engine: E, config: &TokenizerConfig) -> Result<Self> {
        config.validate()?;
        let dict_path = config.dict_path.clone();
        let c_path = dict_path_to_c_string(&dict_path)?;

        let status = engine.initialize(&c_path);
        if status < 0 {
            log::error!(
                "engine failed to load dictionaries from {} (status {status})",
                dict_path.display()
            );
            return Err(TokenizerError::InitFailed { dict_path, status });
        }
        log::info!("tokenizer ready, dictionaries at {}", dict_path.display());

        Ok(Self {
            engine,
            dict_path,
            default_options: config.options,
        })
    }

    /// Segment `text` into tokens
    ///
    /// Empty text returns no tokens without calling the engine. Otherwise the
    /// engine's buffer is decoded and released before this returns, whatever
    /// the outcome.
    ///
    /// # Errors
    ///
    /// [`TokenizerError::InvalidInput`] if the text cannot cross the C
    /// boundary, [`TokenizerError::MemoryLayoutViolation`] if the engine's
    /// buffer breaks its layout. No tokens are returned in either case.
    pub fn segment(&self, text: &str, options: SegmentationOptions) -> Result<Vec<Token>> {
        let Some(buffer) = self.request(text, options)? else {
            return Ok(Vec::new());
        };

        let tokens = buffer
            .into_tokens(options.for_transforming)
            .map_err(|violation| {
                log::error!("discarding result buffer: {violation}");
                TokenizerError::MemoryLayoutViolation(violation)
            })?;
        log::debug!("decoded {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Run only the engine call and hand back the buffer
    ///
    /// Returns `Ok(None)` for empty text. The buffer is released when the
    /// returned value is consumed or dropped.
    pub fn request(
        &self,
        text: &str,
        options: SegmentationOptions,
    ) -> Result<Option<ResultBuffer<'_, E>>> {
        if text.is_empty() {
            return Ok(None);
        }

        let request = SegmentRequest::new(text, options)?;
        let raw = self
            .engine
            .segment(&request)
            .ok_or(LayoutViolation::NullBuffer)?;
        log::debug!(
            "segmented {} codepoints (mode {}) into buffer {:#x}",
            request.codepoint_len(),
            options.mode,
            raw.address()
        );

        // SAFETY: `raw` was just returned by this engine and has no other owner.
        Ok(Some(unsafe { ResultBuffer::from_raw(&self.engine, raw) }))
    }

    /// Segment with the configured default options
    pub fn segment_text(&self, text: &str) -> Result<Vec<Token>> {
        self.segment(text, self.default_options)
    }

    /// Segment a URL
    pub fn segment_url(&self, text: &str) -> Result<Vec<Token>> {
        self.segment(text, SegmentationOptions::url())
    }

    /// Segment a host name
    pub fn segment_host(&self, text: &str) -> Result<Vec<Token>> {
        self.segment(text, SegmentationOptions::host())
    }

    /// Segment with `_` separators inside compounds
    pub fn segment_for_transforming(&self, text: &str) -> Result<Vec<Token>> {
        self.segment(text, self.default_options.for_transforming(true))
    }

    /// Segment and keep only token texts
    pub fn segment_to_strings(&self, text: &str) -> Result<Vec<String>> {
        Ok(tokens_to_strings(&self.segment_text(text)?))
    }

    /// Underlying engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Dictionary directory the engine was initialized from
    pub fn dict_path(&self) -> &Path {
        &self.dict_path
    }

    /// Options used by [`Tokenizer::segment_text`]
    pub fn default_options(&self) -> SegmentationOptions {
        self.default_options
    }
}

/// Dictionary path as the engine receives it, byte for byte on unix
fn dict_path_to_c_string(path: &Path) -> Result<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path
        .to_str()
        .ok_or_else(|| {
            TokenizerError::InvalidInput(format!(
                "dictionary path is not valid UTF-8: {}",
                path.display()
            ))
        })?
        .as_bytes()
        .to_vec();

    CString::new(bytes).map_err(|_| {
        TokenizerError::InvalidInput(format!(
            "dictionary path contains a NUL byte: {}",
            path.display()
        ))
    })
}
