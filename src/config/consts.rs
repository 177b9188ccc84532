// src/config/consts.rs

// Net config
pub const HTTP_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = concat!("printwatch/", env!("CARGO_PKG_VERSION"));

// Device configs
pub const DEFAULT_DEVICES_DIR: &str = "devices";
pub const DEVICE_FILE_EXT: &str = "json";

// Local baselines
pub const STORE_DIR: &str = ".store";
pub const BASELINE_PREFIX: &str = "stored_errors";
pub const LOG_FILE: &str = "debug.log";

// Reports
pub const DEFAULT_REPORT_DIR: &str = "reports";
pub const REPORT_PREFIX: &str = "report";
pub const REPORT_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

// Extraction
pub const UNKNOWN: &str = "Unknown";
pub const PAGE_PREFIX: &str = "Page : ";
pub const DEFAULT_ROW_TAG: &str = "tr";
pub const DEFAULT_CELL_TAG: &str = "td";
pub const MAX_COLUMN_INDEX: u64 = 255;
