// src/runner.rs
use std::path::PathBuf;

use crate::config::RunOptions;
use crate::core::Fetch;
use crate::device::loader::{self, Excluded};
use crate::error::ConfigError;
use crate::progress::Progress;
use crate::report::Emit;
use crate::session::{DeviceSession, SessionResult};
use crate::store::BaselineStore;

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<SessionResult>,
    pub reports: Vec<PathBuf>,
    /// Devices that were attempted but aborted, with the reason.
    pub failed: Vec<(String, String)>,
    /// Config files that never became a session.
    pub excluded: Vec<Excluded>,
}

/// Load every device under `opts.devices_dir` and poll them one after another.
///
/// Per-device failures are recorded and skipped; only an unreadable device
/// directory stops the run.
pub fn run(
    opts: &RunOptions,
    fetch: &dyn Fetch,
    emitter: &dyn Emit,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ConfigError> {
    let loaded = loader::load_dir(&opts.devices_dir)?;
    let store = BaselineStore::new(&opts.store_dir);

    let mut summary = RunSummary { excluded: loaded.excluded, ..RunSummary::default() };

    if let Some(p) = progress.as_deref_mut() {
        for ex in &summary.excluded {
            p.log(&format!("Skipping {}: {}", ex.path.display(), ex.reason));
        }
        p.begin(loaded.active.len());
    }

    for cfg in &loaded.active {
        let mut session = DeviceSession::new(cfg, &store);

        let outcome = session
            .run(fetch)
            .map_err(|e| e.to_string())
            .and_then(|result| {
                session.report(&result, emitter).map(|path| (result, path)).map_err(|e| {
                    loge!("[{}] {e}", cfg.name);
                    e.to_string()
                })
            });

        match outcome {
            Ok((result, path)) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.device_done(&result, &path);
                }
                summary.reports.push(path);
                summary.results.push(result);
            }
            Err(reason) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.device_failed(&cfg.name, &reason);
                }
                summary.failed.push((cfg.name.clone(), reason));
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    logf!(
        "Run finished: {} reported, {} failed, {} excluded",
        summary.reports.len(),
        summary.failed.len(),
        summary.excluded.len()
    );
    Ok(summary)
}
