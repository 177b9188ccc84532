// src/device/mod.rs
//! Device records and the selector vocabulary.
//!
//! A device is described entirely by data: two endpoint URLs and one selector
//! per field. Different printer layouts are different JSON files, not
//! different code. The only way to get a [`DeviceConfig`] is
//! [`DeviceConfig::from_value`], which runs the family schema first.

pub mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::html::Attrs;
use crate::config::consts::{DEFAULT_CELL_TAG, DEFAULT_ROW_TAG};
use crate::error::ConfigError;
use crate::schema;

/// One printer, as configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceConfig {
    pub name: String,
    pub family: Option<String>,
    /// Status page (toner indicator).
    pub status_url: String,
    /// Information page (model, serial, error history).
    pub detail_url: String,
    selectors: BTreeMap<FieldName, SelectorSpec>,
}

/// The fields a session extracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldName {
    Toner,
    Model,
    Serial,
    ErrorHistory,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [Self::Toner, Self::Model, Self::Serial, Self::ErrorHistory];

    /// Key of this field's selector in the device record.
    pub fn key(self) -> &'static str {
        match self {
            Self::Toner => "toner_selector",
            Self::Model => "model_selector",
            Self::Serial => "serial_selector",
            Self::ErrorHistory => "error_selector",
        }
    }
}

/// Where a field lives on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorSpec {
    Indicator(IndicatorSelector),
    LabelPair(LabelPairSelector),
    Table(TableSelector),
}

/// Attribute value on the first element matching `tag` + `attrs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSelector {
    pub tag: String,
    #[serde(default)]
    pub attrs: Attrs,
    pub value_attr: String,
}

/// `<tag>label</tag> … <value_tag>value</value_tag>`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPairSelector {
    pub tag: String,
    pub label: String,
    pub value_tag: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementLocator {
    pub tag: String,
    #[serde(default)]
    pub attrs: Attrs,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingLocator {
    pub tag: String,
    pub text: String,
}

/// container → heading → table → rows → two columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSelector {
    pub container: ElementLocator,
    #[serde(default)]
    pub heading: Option<HeadingLocator>,
    pub table: ElementLocator,
    #[serde(default = "default_row_tag")]
    pub row_tag: String,
    #[serde(default = "default_cell_tag")]
    pub cell_tag: String,
    pub error_column: usize,
    pub page_column: usize,
}

impl TableSelector {
    /// Cells a row must have before both columns can be read.
    pub fn min_cells(&self) -> usize {
        self.error_column.max(self.page_column).saturating_add(1)
    }
}

fn default_row_tag() -> String { s!(DEFAULT_ROW_TAG) }
fn default_cell_tag() -> String { s!(DEFAULT_CELL_TAG) }

/// One error-history entry. Identity is its content, nothing else.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaultRecord {
    #[serde(rename = "error")]
    pub description: String,
    #[serde(rename = "page")]
    pub locator: String,
}

impl FaultRecord {
    pub fn new(description: impl Into<String>, locator: impl Into<String>) -> Self {
        Self { description: description.into(), locator: locator.into() }
    }
}

/// Wire shape of a device record.
#[derive(Deserialize)]
struct RawDeviceConfig {
    printer_name: String,
    #[serde(default)]
    family: Option<String>,
    default_url: String,
    info_url: String,
    #[serde(default)]
    toner_selector: Option<IndicatorSelector>,
    #[serde(default)]
    model_selector: Option<LabelPairSelector>,
    #[serde(default)]
    serial_selector: Option<LabelPairSelector>,
    #[serde(default)]
    error_selector: Option<TableSelector>,
}

impl From<RawDeviceConfig> for DeviceConfig {
    fn from(raw: RawDeviceConfig) -> Self {
        let mut selectors = BTreeMap::new();
        if let Some(s) = raw.toner_selector {
            selectors.insert(FieldName::Toner, SelectorSpec::Indicator(s));
        }
        if let Some(s) = raw.model_selector {
            selectors.insert(FieldName::Model, SelectorSpec::LabelPair(s));
        }
        if let Some(s) = raw.serial_selector {
            selectors.insert(FieldName::Serial, SelectorSpec::LabelPair(s));
        }
        if let Some(s) = raw.error_selector {
            selectors.insert(FieldName::ErrorHistory, SelectorSpec::Table(s));
        }
        Self {
            name: raw.printer_name,
            family: raw.family,
            status_url: raw.default_url,
            detail_url: raw.info_url,
            selectors,
        }
    }
}

impl DeviceConfig {
    /// Validate `value` against its family's schema, then decode it.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let family = value.get("family").and_then(Value::as_str);
        let schema = schema::schema_for(family);
        schema::check(&value, schema)
            .map_err(|violation| ConfigError::Schema { schema: schema.name, violation })?;

        let raw: RawDeviceConfig = serde_json::from_value(value).map_err(ConfigError::Decode)?;
        Ok(raw.into())
    }

    pub fn selector(&self, field: FieldName) -> Option<&SelectorSpec> {
        self.selectors.get(&field)
    }

    pub fn indicator(&self, field: FieldName) -> Option<&IndicatorSelector> {
        match self.selector(field)? {
            SelectorSpec::Indicator(s) => Some(s),
            _ => None,
        }
    }

    pub fn label_pair(&self, field: FieldName) -> Option<&LabelPairSelector> {
        match self.selector(field)? {
            SelectorSpec::LabelPair(s) => Some(s),
            _ => None,
        }
    }

    pub fn table(&self, field: FieldName) -> Option<&TableSelector> {
        match self.selector(field)? {
            SelectorSpec::Table(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_record_decodes_without_selectors() {
        let cfg = DeviceConfig::from_value(json!({
            "printer_name": "lobby",
            "default_url": "http://10.0.0.5/",
            "info_url": "http://10.0.0.5/info.html",
        }))
        .unwrap();
        assert_eq!(cfg.name, "lobby");
        assert!(FieldName::ALL.iter().all(|f| cfg.selector(*f).is_none()));
    }

    #[test]
    fn selectors_land_under_their_field() {
        let cfg = DeviceConfig::from_value(json!({
            "printer_name": "lobby",
            "default_url": "http://10.0.0.5/",
            "info_url": "http://10.0.0.5/info.html",
            "toner_selector": {"tag": "img", "attrs": {"alt": "Black"}, "value_attr": "height"},
            "error_selector": {
                "container": {"tag": "div"},
                "table": {"tag": "table", "attrs": {"class": "errorHistory"}},
                "error_column": 0,
                "page_column": 2
            }
        }))
        .unwrap();

        assert_eq!(cfg.indicator(FieldName::Toner).unwrap().value_attr, "height");
        let table = cfg.table(FieldName::ErrorHistory).unwrap();
        assert_eq!(table.row_tag, "tr");
        assert_eq!(table.cell_tag, "td");
        assert_eq!(table.min_cells(), 3);
        assert!(cfg.label_pair(FieldName::Toner).is_none());
    }

    #[test]
    fn fault_records_use_error_page_keys() {
        let rec = FaultRecord::new("Paper Jam", "12");
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v, json!({"error": "Paper Jam", "page": "12"}));
    }
}
