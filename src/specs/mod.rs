// src/specs/mod.rs
//! # Field extraction
//!
//! This module turns a parsed page plus a declarative selector into one field
//! value. Each selector variant has its own module and its own extraction
//! function; [`extract`] picks one by matching on [`SelectorSpec`].
//!
//! ## What lives here
//! - **Pure HTML reading** over `scraper::Html` documents already fetched by
//!   the session.
//! - **Tolerant lookups**: a selector whose target is absent yields the
//!   `"Unknown"` sentinel (indicator, label pair) or an empty history (table).
//!   Gaps are logged, never raised.
//! - **Light text shaping**: values are end-trimmed, the `"Page : "` locator
//!   prefix and NBSP are stripped (see `core::sanitize`).
//!
//! ## What does **not** live here
//! - **Fetching** (`core::net`), **baselines** (`store`), **diffing** (`diff`).
//! - **Which** selector applies to which field: that is the device record's job.
//!
//! ## Call chain
//! ```text
//! session → fetch status/detail pages → Html::parse_document
//!         → specs::indicator / label_pair / fault_history
//!         → SessionResult fields
//! ```
//!
//! ## Conventions & invariants
//! - Tag names compare case-insensitively; `class` matches by token subset.
//! - First match in document order wins.
//! - Every function here is total: no `Result`, no panics on odd markup.
//!
//! Specs should be testable **offline** against captured fixtures.
pub mod fault_history;
pub mod indicator;
pub mod label_pair;

use scraper::Html;

use crate::device::{FaultRecord, SelectorSpec};

pub use fault_history::extract_fault_history;
pub use indicator::extract_indicator;
pub use label_pair::{extract_label, extract_label_pair};

/// What a selector produced. Sessions match on this per field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Records(Vec<FaultRecord>),
}

pub fn extract(doc: &Html, spec: &SelectorSpec) -> FieldValue {
    match spec {
        SelectorSpec::Indicator(s) => FieldValue::Text(extract_indicator(doc, s)),
        SelectorSpec::LabelPair(s) => FieldValue::Text(extract_label(doc, s)),
        SelectorSpec::Table(s) => FieldValue::Records(extract_fault_history(doc, s)),
    }
}
