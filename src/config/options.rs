// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

/// Everything a run needs to know about its surroundings.
///
/// Built once by the frontend and passed down; nothing below reads globals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Directory scanned for per-device `*.json` records.
    pub devices_dir: PathBuf,
    pub report_dir: PathBuf,
    /// Baselines and the debug log live here.
    pub store_dir: PathBuf,
    pub net: NetOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            devices_dir: PathBuf::from(DEFAULT_DEVICES_DIR),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            store_dir: PathBuf::from(STORE_DIR),
            net: NetOptions::default(),
        }
    }
}

impl RunOptions {
    pub fn log_path(&self) -> PathBuf {
        self.store_dir.join(LOG_FILE)
    }

    /// All three directories rooted under `root`, the way tests lay them out.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            devices_dir: root.join(DEFAULT_DEVICES_DIR),
            report_dir: root.join(DEFAULT_REPORT_DIR),
            store_dir: root.join(STORE_DIR),
            net: NetOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
        }
    }
}
