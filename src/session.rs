// src/session.rs
//! One polling cycle for one device.
//!
//! ```text
//! Created → FetchedStatus → FetchedDetail → Extracted → Validated → Diffed → Reported
//!    └──────────┴───────────────┴── fetch failure ──→ Aborted
//!                                          Validated ── store failure ──→ Aborted
//! ```
//!
//! A session borrows its (already validated) config, owns the
//! read-modify-write of that device's baseline, and keeps nothing once it is
//! done. Sessions for different devices share no state.

use std::path::PathBuf;

use scraper::Html;

use crate::config::consts::UNKNOWN;
use crate::core::Fetch;
use crate::device::{DeviceConfig, FaultRecord, FieldName};
use crate::error::{FetchError, ReportError, SessionError};
use crate::report::Emit;
use crate::specs::{self, FieldValue};
use crate::store::{BaselineStore, Identity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Created,
    FetchedStatus,
    FetchedDetail,
    Extracted,
    Validated,
    Diffed,
    Reported,
    Aborted,
}

/// Everything a report needs about one device for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub device_name: String,
    pub serial: String,
    pub model: String,
    pub toner: String,
    /// Full history as currently shown by the device.
    pub history: Vec<FaultRecord>,
    /// Delta against the baseline; on a first run, the whole history.
    pub new_records: Vec<FaultRecord>,
    pub first_run: bool,
}

struct Extracted {
    toner: String,
    model: String,
    serial: String,
    history: Vec<FaultRecord>,
}

pub struct DeviceSession<'a> {
    config: &'a DeviceConfig,
    store: &'a BaselineStore,
    state: SessionState,
}

impl<'a> DeviceSession<'a> {
    pub fn new(config: &'a DeviceConfig, store: &'a BaselineStore) -> Self {
        Self { config, store, state: SessionState::Created }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn device_name(&self) -> &str {
        &self.config.name
    }

    /// Drive the session from `Created` to `Diffed`.
    pub fn run(&mut self, fetch: &dyn Fetch) -> Result<SessionResult, SessionError> {
        let cfg: &'a DeviceConfig = self.config;
        let name = &cfg.name;
        logd!("[{name}] session start");

        let status = self.fetch(fetch, &cfg.status_url)?;
        self.state = SessionState::FetchedStatus;

        let detail = self.fetch(fetch, &cfg.detail_url)?;
        self.state = SessionState::FetchedDetail;

        let fields = self.extract(&status, &detail);
        self.state = SessionState::Extracted;

        let identity = self.identity(&fields.serial);
        self.state = SessionState::Validated;

        let d = match self.store.reconcile(&identity, &fields.history) {
            Ok(d) => d,
            Err(e) => {
                self.state = SessionState::Aborted;
                loge!("[{name}] baseline for {identity}: {e}");
                return Err(e.into());
            }
        };
        self.state = SessionState::Diffed;

        logf!(
            "[{name}] serial={} toner={} history={} new={}{}",
            fields.serial,
            fields.toner,
            fields.history.len(),
            d.new_records.len(),
            if d.first_run { " (first run)" } else { "" }
        );

        Ok(SessionResult {
            device_name: name.clone(),
            serial: fields.serial,
            model: fields.model,
            toner: fields.toner,
            history: fields.history,
            new_records: d.new_records,
            first_run: d.first_run,
        })
    }

    /// `Diffed → Reported`.
    pub fn report(&mut self, result: &SessionResult, emitter: &dyn Emit) -> Result<PathBuf, ReportError> {
        debug_assert_eq!(self.state, SessionState::Diffed);
        let path = emitter.emit(result)?;
        self.state = SessionState::Reported;
        Ok(path)
    }

    fn fetch(&mut self, fetch: &dyn Fetch, url: &str) -> Result<String, SessionError> {
        fetch.fetch(url).map_err(|source: FetchError| {
            loge!("[{}] {source}", self.config.name);
            let stage = self.state;
            self.state = SessionState::Aborted;
            SessionError::Fetch { stage, source }
        })
    }

    fn extract(&self, status: &str, detail: &str) -> Extracted {
        let status_doc = Html::parse_document(status);
        let detail_doc = Html::parse_document(detail);

        let mut out = Extracted {
            toner: s!(UNKNOWN),
            model: s!(UNKNOWN),
            serial: s!(UNKNOWN),
            history: Vec::new(),
        };
        for field in FieldName::ALL {
            let Some(spec) = self.config.selector(field) else {
                logd!("[{}] no {} configured", self.config.name, field.key());
                continue;
            };
            let doc = match field {
                FieldName::Toner => &status_doc,
                _ => &detail_doc,
            };
            match (field, specs::extract(doc, spec)) {
                (FieldName::Toner, FieldValue::Text(v)) => out.toner = v,
                (FieldName::Model, FieldValue::Text(v)) => out.model = v,
                (FieldName::Serial, FieldValue::Text(v)) => out.serial = v,
                (FieldName::ErrorHistory, FieldValue::Records(v)) => out.history = v,
                (field, _) => logw!("[{}] {} has the wrong selector kind", self.config.name, field.key()),
            }
        }
        out
    }

    /// Baseline key: the serial, or the device name when it is unknown.
    fn identity(&self, serial: &str) -> Identity {
        if serial != UNKNOWN && !serial.is_empty() {
            return Identity::Serial(s!(serial));
        }
        logw!("[{}] serial unknown; baseline keyed by device name", self.config.name);
        Identity::Name(self.config.name.clone())
    }
}
