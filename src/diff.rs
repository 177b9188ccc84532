// src/diff.rs
//! Known vs. new error-history entries.
//!
//! Records are compared by content only. The device exposes no timestamp or
//! sequence number, so an identical fault that recurs after scrolling out of
//! the device's window shows up as new again.

use crate::device::FaultRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diff {
    /// On a first run: everything observed (the initial baseline).
    pub new_records: Vec<FaultRecord>,
    pub first_run: bool,
}

impl Diff {
    /// Whether the baseline must be replaced by the current history.
    pub fn replaces_baseline(&self) -> bool {
        self.first_run || !self.new_records.is_empty()
    }
}

/// Partition `current` against `baseline`, keeping `current`'s order.
pub fn diff(current: &[FaultRecord], baseline: &[FaultRecord]) -> Diff {
    if baseline.is_empty() {
        return Diff { new_records: current.to_vec(), first_run: true };
    }
    let new_records = current
        .iter()
        .filter(|rec| !baseline.contains(rec))
        .cloned()
        .collect();
    Diff { new_records, first_run: false }
}
