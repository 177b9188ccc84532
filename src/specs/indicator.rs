// src/specs/indicator.rs
//! Indicator fields: one attribute on one element.
//!
//! Brother status pages draw the toner level as an `<img class="tonerremain">`
//! whose `height` attribute is proportional to what is left, so the "value"
//! here is usually a number-as-text proxy rather than a percentage.

use scraper::Html;

use crate::config::consts::UNKNOWN;
use crate::core::html::find_first;
use crate::device::IndicatorSelector;

pub fn extract_indicator(doc: &Html, spec: &IndicatorSelector) -> String {
    let Some(el) = find_first(doc.root_element(), &spec.tag, &spec.attrs) else {
        logw!("Indicator: no <{}> matching {:?}", spec.tag, spec.attrs);
        return s!(UNKNOWN);
    };
    match el.value().attr(&spec.value_attr) {
        Some(v) => s!(v.trim()),
        None => {
            logw!("Indicator: <{}> has no '{}' attribute", spec.tag, spec.value_attr);
            s!(UNKNOWN)
        }
    }
}
