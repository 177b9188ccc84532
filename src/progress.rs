// src/progress.rs
use std::path::Path;

use crate::session::SessionResult;

/// Lightweight progress reporting for a run over many devices.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of active devices.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A device finished and its report was written.
    fn device_done(&mut self, _result: &SessionResult, _report: &Path) {}

    /// A device was aborted; the run carries on.
    fn device_failed(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
