// src/specs/label_pair.rs
//! Label/value lookups such as `<dt>Serial no.</dt><dd>E78123A9N123456</dd>`.

use scraper::Html;

use crate::config::consts::UNKNOWN;
use crate::core::html::{find_by_text, next_after, trimmed_text};
use crate::device::LabelPairSelector;

/// Text of the first `value_tag` element after the label, or `"Unknown"`.
pub fn extract_label(doc: &Html, spec: &LabelPairSelector) -> String {
    let root = doc.root_element();
    let Some(label) = find_by_text(root, &spec.tag, &spec.label) else {
        logw!("Label: no <{}> reading '{}'", spec.tag, spec.label);
        return s!(UNKNOWN);
    };
    match next_after(root, label, &spec.value_tag) {
        Some(value) => trimmed_text(value),
        None => {
            logw!("Label: '{}' has no following <{}>", spec.label, spec.value_tag);
            s!(UNKNOWN)
        }
    }
}

/// `(model, serial)`. Each side is looked up on its own; an absent selector
/// counts as an absent label.
pub fn extract_label_pair(
    doc: &Html,
    model: Option<&LabelPairSelector>,
    serial: Option<&LabelPairSelector>,
) -> (String, String) {
    let lookup = |spec: Option<&LabelPairSelector>| spec.map_or_else(|| s!(UNKNOWN), |s| extract_label(doc, s));
    (lookup(model), lookup(serial))
}
