// src/report.rs
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::consts::{REPORT_PREFIX, REPORT_TIMESTAMP};
use crate::core::sanitize::escape_filename;
use crate::device::FaultRecord;
use crate::error::ReportError;
use crate::session::SessionResult;

/// Receives a finished session's result and renders it somewhere.
pub trait Emit {
    fn emit(&self, result: &SessionResult) -> Result<PathBuf, ReportError>;
}

/// One timestamped text file per device per run.
pub struct TextReport {
    dir: PathBuf,
}

impl TextReport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, result: &SessionResult, at: DateTime<Local>) -> PathBuf {
        let device = escape_filename(&result.device_name);
        let stamp = at.format(REPORT_TIMESTAMP);
        self.dir.join(format!("{REPORT_PREFIX}_{device}_{stamp}.txt"))
    }
}

impl Emit for TextReport {
    fn emit(&self, result: &SessionResult) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::Io { path: self.dir.clone(), source })?;
        let path = self.path_for(result, Local::now());
        fs::write(&path, render(result)).map_err(|source| ReportError::Io { path: path.clone(), source })?;
        logf!("[{}] report saved as {}", result.device_name, path.display());
        Ok(path)
    }
}

/// Which of the three outcomes a result represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InitialErrors,
    NewErrors,
    NoNewErrors,
}

impl Outcome {
    pub fn of(result: &SessionResult) -> Self {
        match (result.first_run, result.new_records.is_empty()) {
            (_, true) => Outcome::NoNewErrors,
            (true, false) => Outcome::InitialErrors,
            (false, false) => Outcome::NewErrors,
        }
    }
}

pub fn render(result: &SessionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Daily Printer Status Report");
    let _ = writeln!(out, "==========================");
    let _ = writeln!(out, "Printer Name: {}", result.device_name);
    let _ = writeln!(out, "Model Name: {}", result.model);
    let _ = writeln!(out, "Serial Number: {}", result.serial);
    let _ = writeln!(out, "Toner Level (height value): {}", result.toner);

    match Outcome::of(result) {
        Outcome::InitialErrors => write_errors(&mut out, "Initial Errors:", &result.new_records),
        Outcome::NewErrors => write_errors(&mut out, "New Errors:", &result.new_records),
        Outcome::NoNewErrors => {
            let _ = writeln!(out, "\nNo new errors.");
        }
    }
    out
}

fn write_errors(out: &mut String, title: &str, records: &[FaultRecord]) {
    let _ = writeln!(out, "\n{title}");
    for r in records {
        let _ = writeln!(out, "Error: {}, Page: {}", r.description, r.locator);
    }
}
