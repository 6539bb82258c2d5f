//! Binding to the native segmentation engine
//!
//! The engine exposes a small C ABI around a process-wide tokenizer object.
//! Dictionaries are loaded once per process; [`NativeEngine::initialize`]
//! runs the load behind an [`InitOnce`] barrier and replays its status
//! afterwards.

#[cfg(target_endian = "big")]
compile_error!("the engine result buffer is little-endian; big-endian targets are not supported");

use crate::gateway::{Engine, RawBuffer, SegmentRequest};
use crate::init::InitOnce;
use std::ffi::{c_char, c_int, c_longlong, CStr};

mod ffi {
    use super::*;

    extern "C" {
        pub fn initialize(dict_path: *const c_char) -> c_int;

        #[link_name = "segmentPointer"]
        pub fn segment_pointer(
            text: *const c_char,
            for_transforming: bool,
            tokenize_option: c_int,
            keep_puncts: bool,
            text_length: c_int,
        ) -> c_longlong;

        #[link_name = "freeMemory"]
        pub fn free_memory(res_pointer: c_longlong);
    }
}

static LOADED: InitOnce = InitOnce::new();

/// The native engine
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

impl NativeEngine {
    /// Handle to the process-wide engine
    pub fn new() -> Self {
        Self
    }
}

unsafe impl Engine for NativeEngine {
    fn initialize(&self, dict_path: &CStr) -> i32 {
        LOADED.initialize(dict_path, |path| {
            log::info!("loading segmentation dictionaries from {:?}", path);
            // SAFETY: `path` is a valid NUL-terminated string.
            unsafe { ffi::initialize(path.as_ptr()) }
        })
    }

    fn segment(&self, request: &SegmentRequest) -> Option<RawBuffer> {
        // SAFETY: the text is NUL-terminated and outlives the call; the
        // engine copies what it needs.
        let address = unsafe {
            ffi::segment_pointer(
                request.text().as_ptr(),
                request.options().for_transforming,
                request.mode(),
                request.options().keep_punctuation,
                request.codepoint_len(),
            )
        };
        RawBuffer::from_address(address)
    }

    unsafe fn release(&self, buffer: RawBuffer) {
        ffi::free_memory(buffer.address());
    }
}
