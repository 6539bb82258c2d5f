//! Foreign call boundary to a segmentation engine

use crate::error::{Result, TokenizerError};
use std::ffi::{CStr, CString};
use std::ptr::NonNull;
use tachtu_core::SegmentationOptions;

/// Opaque handle to one engine result buffer
///
/// The handle points at the 64-byte header described in
/// [`tachtu_core::layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBuffer(NonNull<u8>);

impl RawBuffer {
    /// Wrap a header pointer, rejecting null
    pub fn new(ptr: *mut u8) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// Wrap an address as returned by the engine's C ABI
    pub fn from_address(address: i64) -> Option<Self> {
        Self::new(address as usize as *mut u8)
    }

    /// Header pointer
    pub fn as_ptr(&self) -> *const u8 {
        self.0.as_ptr()
    }

    /// Header address in the form the C ABI expects
    pub fn address(&self) -> i64 {
        self.0.as_ptr() as usize as i64
    }
}

/// Arguments of one segmentation call, marshaled for the C boundary
#[derive(Debug, Clone)]
pub struct SegmentRequest {
    text: CString,
    codepoint_len: i32,
    options: SegmentationOptions,
}

impl SegmentRequest {
    /// Marshal a text and its options
    ///
    /// The engine indexes its arrays by codepoint, so the length passed along
    /// is the codepoint count, not the byte length.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizerError::InvalidInput`] if the text contains a NUL
    /// byte or has more than `i32::MAX` codepoints.
    pub fn new(text: &str, options: SegmentationOptions) -> Result<Self> {
        let codepoint_len = i32::try_from(text.chars().count()).map_err(|_| {
            TokenizerError::InvalidInput("text exceeds i32::MAX codepoints".to_string())
        })?;
        let text = CString::new(text).map_err(|e| {
            TokenizerError::InvalidInput(format!("NUL byte at position {}", e.nul_position()))
        })?;

        Ok(Self {
            text,
            codepoint_len,
            options,
        })
    }

    /// NUL-terminated UTF-8 text
    pub fn text(&self) -> &CStr {
        &self.text
    }

    /// Codepoint length of the text
    pub fn codepoint_len(&self) -> i32 {
        self.codepoint_len
    }

    /// Options the call was made with
    pub fn options(&self) -> &SegmentationOptions {
        &self.options
    }

    /// Raw tokenize mode value
    pub fn mode(&self) -> i32 {
        self.options.mode.as_raw()
    }
}

/// A segmentation engine reached through a foreign call boundary
///
/// # Safety
///
/// Every buffer returned by [`Engine::segment`] must point at a header laid
/// out as in [`tachtu_core::layout`], whose table addresses stay valid for
/// the advertised counts until the buffer is passed to [`Engine::release`].
/// The codepoint array must hold at least `max(endPos)` entries.
pub unsafe trait Engine {
    /// Load dictionaries from `dict_path`; negative status means failure
    fn initialize(&self, dict_path: &CStr) -> i32;

    /// Segment one text, returning `None` if the engine produced no buffer
    fn segment(&self, request: &SegmentRequest) -> Option<RawBuffer>;

    /// Free a buffer returned by [`Engine::segment`]
    ///
    /// # Safety
    ///
    /// `buffer` must come from this engine and must not have been released.
    unsafe fn release(&self, buffer: RawBuffer);
}

unsafe impl<E: Engine + ?Sized> Engine for &E {
    fn initialize(&self, dict_path: &CStr) -> i32 {
        (**self).initialize(dict_path)
    }

    fn segment(&self, request: &SegmentRequest) -> Option<RawBuffer> {
        (**self).segment(request)
    }

    unsafe fn release(&self, buffer: RawBuffer) {
        (**self).release(buffer)
    }
}

unsafe impl<E: Engine + ?Sized> Engine for Box<E> {
    fn initialize(&self, dict_path: &CStr) -> i32 {
        (**self).initialize(dict_path)
    }

    fn segment(&self, request: &SegmentRequest) -> Option<RawBuffer> {
        (**self).segment(request)
    }

    unsafe fn release(&self, buffer: RawBuffer) {
        (**self).release(buffer)
    }
}
