// src/store.rs
//! Persisted error-history baselines, one JSON file per device identity.
//!
//! A baseline is always the device's full last-seen history, never a running
//! log: writes replace the file wholesale (temp file + rename), so readers see
//! either the old or the new snapshot.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::config::consts::BASELINE_PREFIX;
use crate::core::sanitize::escape_filename;
use crate::device::FaultRecord;
use crate::diff::{self, Diff};
use crate::error::StoreError;

/// Whose history a baseline holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identity {
    Serial(String),
    /// Serial unreadable; keyed by the configured `printer_name`.
    Name(String),
}

impl Identity {
    /// File stem. Serials map to their escaped form; names get a `_name-`
    /// prefix that an escaped serial can never start with.
    pub fn stem(&self) -> String {
        match self {
            Identity::Serial(serial) => escape_filename(serial),
            Identity::Name(name) => format!("_name-{}", escape_filename(name)),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Serial(serial) => write!(f, "serial {serial}"),
            Identity::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

pub struct BaselineStore {
    dir: PathBuf,
}

impl BaselineStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/stored_errors_<stem>.json`
    pub fn path_for(&self, identity: &Identity) -> PathBuf {
        self.dir.join(format!("{BASELINE_PREFIX}_{}.json", identity.stem()))
    }

    /// Empty when no baseline exists yet (first run).
    pub fn load(&self, identity: &Identity) -> Result<Vec<FaultRecord>, StoreError> {
        let path = self.path_for(identity);
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Decode { path, source })
    }

    /// Replace the baseline for `identity` with `records`.
    pub fn save(&self, identity: &Identity, records: &[FaultRecord]) -> Result<PathBuf, StoreError> {
        let path = self.path_for(identity);
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;

        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        records
            .serialize(&mut ser)
            .map_err(|source| StoreError::Encode { path: path.clone(), source })?;
        buf.push(b'\n');

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &buf).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path: path.clone(), source })?;
        Ok(path)
    }

    /// Load, diff, and replace the baseline when the diff calls for it.
    pub fn reconcile(&self, identity: &Identity, current: &[FaultRecord]) -> Result<Diff, StoreError> {
        let baseline = self.load(identity)?;
        let d = diff::diff(current, &baseline);
        if d.replaces_baseline() {
            let path = self.save(identity, current)?;
            logd!("Baseline {} replaced ({} record(s))", path.display(), current.len());
        } else {
            logd!("Baseline for {identity} unchanged");
        }
        Ok(d)
    }
}
