// src/device/loader.rs
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::DeviceConfig;
use crate::config::consts::DEVICE_FILE_EXT;
use crate::error::ConfigError;

/// Result of scanning a device directory.
#[derive(Debug, Default)]
pub struct LoadedDevices {
    pub active: Vec<DeviceConfig>,
    pub excluded: Vec<Excluded>,
}

/// A file left out of the active set, and why.
#[derive(Debug)]
pub struct Excluded {
    pub path: PathBuf,
    pub reason: ConfigError,
}

/// Load every `*.json` device record in `dir`, in file-name order.
///
/// Bad files are excluded and logged; only an unreadable directory is an error.
pub fn load_dir(dir: &Path) -> Result<LoadedDevices, ConfigError> {
    let io_err = |source| ConfigError::Io { path: dir.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_record = path.is_file()
            && path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case(DEVICE_FILE_EXT));
        if is_record {
            paths.push(path);
        }
    }
    paths.sort();

    let mut out = LoadedDevices::default();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for path in paths {
        let loaded = load_file(&path).and_then(|cfg| match seen.get(&cfg.name) {
            Some(first) => Err(ConfigError::DuplicateName { name: cfg.name, first: first.clone() }),
            None => Ok(cfg),
        });
        match loaded {
            Ok(cfg) => {
                logd!("Loaded device '{}' from {}", cfg.name, path.display());
                seen.insert(cfg.name.clone(), path);
                out.active.push(cfg);
            }
            Err(reason) => {
                logw!("Excluding {}: {reason}", path.display());
                out.excluded.push(Excluded { path, reason });
            }
        }
    }

    logf!(
        "Devices in {}: {} active, {} excluded",
        dir.display(),
        out.active.len(),
        out.excluded.len()
    );
    Ok(out)
}

pub fn load_file(path: &Path) -> Result<DeviceConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let value: Value =
        serde_json::from_str(&text).map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;
    DeviceConfig::from_value(value)
}
