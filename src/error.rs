// src/error.rs
//! Error types, one enum per concern.
//!
//! Nothing here is fatal to a run on its own: the runner decides per device
//! whether an error excludes a config, aborts a session, or is just logged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionState;

/// A page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} unavailable: {reason}")]
    Unavailable { url: String, reason: String },
}

/// The first structural rule a device record breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("{path}: missing required key")]
    Missing { path: String },

    #[error("{path}: expected {expected}, found {found}")]
    WrongKind {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{path}: not an http(s) URL: {value:?}")]
    InvalidUrl { path: String, value: String },
}

/// Why a device config file was left out of the active set.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema '{schema}' rejected the record: {violation}")]
    Schema {
        schema: &'static str,
        violation: SchemaViolation,
    },

    #[error("cannot decode device record: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("duplicate printer_name '{name}' (first seen in {first})")]
    DuplicateName { name: String, first: PathBuf },
}

/// Baseline file problems.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("baseline I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("baseline {path} is corrupt: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode baseline {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A device session stopped before producing a result.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("fetch failed in state {stage:?}: {source}")]
    Fetch {
        stage: SessionState,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
