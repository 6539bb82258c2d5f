//! One-time initialization for process-wide engines

use std::ffi::{CStr, CString};
use std::sync::OnceLock;

/// Status returned when the engine was already loaded from another path
pub const STATUS_ALREADY_INITIALIZED: i32 = -2;

/// Barrier around a dictionary load that may run at most once per process
///
/// The first call runs the load and records its path and status. Later calls
/// with the same path replay that status; a different path gets
/// [`STATUS_ALREADY_INITIALIZED`] and the load is not run again.
#[derive(Debug, Default)]
pub struct InitOnce {
    loaded: OnceLock<(CString, i32)>,
}

impl InitOnce {
    /// Barrier that has not loaded anything yet
    pub const fn new() -> Self {
        Self {
            loaded: OnceLock::new(),
        }
    }

    /// Run `load` on the first call, replay its status afterwards
    pub fn initialize(&self, dict_path: &CStr, load: impl FnOnce(&CStr) -> i32) -> i32 {
        let (loaded_path, status) = self
            .loaded
            .get_or_init(|| (dict_path.to_owned(), load(dict_path)));

        if loaded_path.as_c_str() != dict_path {
            log::warn!(
                "engine already loaded from {:?}; ignoring {:?}",
                loaded_path,
                dict_path
            );
            return STATUS_ALREADY_INITIALIZED;
        }
        *status
    }

    /// Dictionary path and status of the load, if it happened
    pub fn loaded(&self) -> Option<(&CStr, i32)> {
        self.loaded
            .get()
            .map(|(path, status)| (path.as_c_str(), *status))
    }
}
