// src/schema.rs
//! Structural validation of raw device records.
//!
//! Each device family maps to a schema; unknown families get [`BASE`], which
//! insists only on the name and the two endpoints. Family schemas are
//! stricter and require every selector a layout is known to carry. Optional
//! keys are still shape-checked when present, so a record that passes can
//! always be decoded into a `DeviceConfig`.

use serde_json::{Map, Value};
use url::Url;

use crate::config::consts::MAX_COLUMN_INDEX;
use crate::error::SchemaViolation;

#[derive(Debug)]
pub enum Kind {
    Str,
    /// Absolute http(s) URL.
    Url,
    /// Column index, `0..=MAX_COLUMN_INDEX`.
    Index,
    /// Object of string values (attribute map).
    StrMap,
    Object(&'static [Field]),
}

impl Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Str => "string",
            Kind::Url => "URL string",
            Kind::Index => "column index (0-255)",
            Kind::StrMap => "object of strings",
            Kind::Object(_) => "object",
        }
    }
}

#[derive(Debug)]
pub struct Field {
    pub key: &'static str,
    pub kind: Kind,
    pub required: bool,
}

const fn req(key: &'static str, kind: Kind) -> Field {
    Field { key, kind, required: true }
}

const fn opt(key: &'static str, kind: Kind) -> Field {
    Field { key, kind, required: false }
}

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

const INDICATOR: &[Field] = &[
    req("tag", Kind::Str),
    opt("attrs", Kind::StrMap),
    req("value_attr", Kind::Str),
];

const LABEL_PAIR: &[Field] = &[
    req("tag", Kind::Str),
    req("label", Kind::Str),
    req("value_tag", Kind::Str),
];

const LOCATOR: &[Field] = &[
    req("tag", Kind::Str),
    opt("attrs", Kind::StrMap),
];

const HEADING: &[Field] = &[
    req("tag", Kind::Str),
    req("text", Kind::Str),
];

const TABLE: &[Field] = &[
    req("container", Kind::Object(LOCATOR)),
    opt("heading", Kind::Object(HEADING)),
    req("table", Kind::Object(LOCATOR)),
    opt("row_tag", Kind::Str),
    opt("cell_tag", Kind::Str),
    req("error_column", Kind::Index),
    req("page_column", Kind::Index),
];

pub const BASE: Schema = Schema {
    name: "base",
    fields: &[
        req("printer_name", Kind::Str),
        opt("family", Kind::Str),
        req("default_url", Kind::Url),
        req("info_url", Kind::Url),
        opt("toner_selector", Kind::Object(INDICATOR)),
        opt("model_selector", Kind::Object(LABEL_PAIR)),
        opt("serial_selector", Kind::Object(LABEL_PAIR)),
        opt("error_selector", Kind::Object(TABLE)),
    ],
};

/// Brother embedded web UI: status page toner bar + information page.
pub const BROTHER: Schema = Schema {
    name: "brother",
    fields: &[
        req("printer_name", Kind::Str),
        req("family", Kind::Str),
        req("default_url", Kind::Url),
        req("info_url", Kind::Url),
        req("toner_selector", Kind::Object(INDICATOR)),
        req("model_selector", Kind::Object(LABEL_PAIR)),
        req("serial_selector", Kind::Object(LABEL_PAIR)),
        req("error_selector", Kind::Object(TABLE)),
    ],
};

const FAMILIES: &[(&str, &Schema)] = &[("brother", &BROTHER)];

/// Schema for a declared family; [`BASE`] when unknown or absent.
pub fn schema_for(family: Option<&str>) -> &'static Schema {
    family
        .and_then(|f| FAMILIES.iter().find(|(name, _)| name.eq_ignore_ascii_case(f.trim())))
        .map(|(_, schema)| *schema)
        .unwrap_or(&BASE)
}

/// True iff `config` satisfies `schema`; logs the violation otherwise.
pub fn validate(config: &Value, schema: &Schema) -> bool {
    match check(config, schema) {
        Ok(()) => true,
        Err(v) => {
            let name = config.get("printer_name").and_then(Value::as_str).unwrap_or("<unnamed>");
            logw!("Device '{name}' rejected by schema '{}': {v}", schema.name);
            false
        }
    }
}

/// First violation, if any.
pub fn check(config: &Value, schema: &Schema) -> Result<(), SchemaViolation> {
    let obj = config.as_object().ok_or_else(|| SchemaViolation::WrongKind {
        path: s!("$"),
        expected: "object",
        found: kind_of(config),
    })?;
    check_fields(obj, schema.fields, "")
}

fn check_fields(obj: &Map<String, Value>, fields: &[Field], prefix: &str) -> Result<(), SchemaViolation> {
    for field in fields {
        let path = if prefix.is_empty() { s!(field.key) } else { format!("{prefix}.{}", field.key) };
        match obj.get(field.key) {
            None | Some(Value::Null) if !field.required => {}
            None => return Err(SchemaViolation::Missing { path }),
            Some(v) => check_value(v, &field.kind, &path)?,
        }
    }
    Ok(())
}

fn check_value(v: &Value, kind: &Kind, path: &str) -> Result<(), SchemaViolation> {
    let wrong = || SchemaViolation::WrongKind { path: s!(path), expected: kind.name(), found: kind_of(v) };
    match kind {
        Kind::Str => v.as_str().map(|_| ()).ok_or_else(wrong),
        Kind::Url => {
            let s = v.as_str().ok_or_else(wrong)?;
            match Url::parse(s) {
                Ok(u) if matches!(u.scheme(), "http" | "https") => Ok(()),
                _ => Err(SchemaViolation::InvalidUrl { path: s!(path), value: s!(s) }),
            }
        }
        Kind::Index => v.as_u64().filter(|n| *n <= MAX_COLUMN_INDEX).map(|_| ()).ok_or_else(wrong),
        Kind::StrMap => {
            let map = v.as_object().ok_or_else(wrong)?;
            for (k, inner) in map {
                if !inner.is_string() {
                    return Err(SchemaViolation::WrongKind {
                        path: format!("{path}.{k}"),
                        expected: "string",
                        found: kind_of(inner),
                    });
                }
            }
            Ok(())
        }
        Kind::Object(fields) => {
            let map = v.as_object().ok_or_else(wrong)?;
            check_fields(map, fields, path)
        }
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::device::DeviceConfig;

    fn brother_record() -> Value {
        json!({
            "printer_name": "office-2f",
            "family": "brother",
            "default_url": "http://192.168.0.33/",
            "info_url": "http://192.168.0.33/general/information.html?kind=item",
            "toner_selector": {"tag": "img", "attrs": {"class": "tonerremain", "alt": "Black"}, "value_attr": "height"},
            "model_selector": {"tag": "dt", "label": "Model Name", "value_tag": "dd"},
            "serial_selector": {"tag": "dt", "label": "Serial no.", "value_tag": "dd"},
            "error_selector": {
                "container": {"tag": "div", "attrs": {"class": "contentsGroup"}},
                "heading": {"tag": "h3", "text": "Error History(last 10 errors)"},
                "table": {"tag": "table", "attrs": {"class": "list errorHistory"}},
                "row_tag": "tr",
                "error_column": 0,
                "page_column": 1
            }
        })
    }

    #[test]
    fn family_lookup_falls_back_to_base() {
        assert_eq!(schema_for(Some("brother")).name, "brother");
        assert_eq!(schema_for(Some(" Brother ")).name, "brother");
        assert_eq!(schema_for(Some("acme")).name, "base");
        assert_eq!(schema_for(None).name, "base");
    }

    #[test]
    fn full_brother_record_passes() {
        assert!(validate(&brother_record(), &BROTHER));
    }

    #[test]
    fn base_requires_only_name_and_endpoints() {
        let v = json!({
            "printer_name": "lobby",
            "default_url": "http://10.0.0.5/",
            "info_url": "https://10.0.0.5/info",
        });
        assert_eq!(check(&v, &BASE), Ok(()));
        assert!(!validate(&v, &BROTHER));
    }

    #[test]
    fn missing_info_url_is_reported_by_path() {
        let mut v = brother_record();
        v.as_object_mut().unwrap().remove("info_url");
        assert_eq!(check(&v, &BASE), Err(SchemaViolation::Missing { path: s!("info_url") }));
    }

    #[test]
    fn nested_violations_carry_full_path() {
        let mut v = brother_record();
        v["error_selector"]["table"].as_object_mut().unwrap().remove("tag");
        assert_eq!(
            check(&v, &BROTHER),
            Err(SchemaViolation::Missing { path: s!("error_selector.table.tag") })
        );

        let mut v = brother_record();
        v["error_selector"]["page_column"] = json!(-1);
        assert!(matches!(
            check(&v, &BROTHER),
            Err(SchemaViolation::WrongKind { ref path, .. }) if path == "error_selector.page_column"
        ));

        let mut v = brother_record();
        v["toner_selector"]["attrs"]["alt"] = json!(3);
        assert!(matches!(
            check(&v, &BROTHER),
            Err(SchemaViolation::WrongKind { ref path, found: "number", .. }) if path == "toner_selector.attrs.alt"
        ));
    }

    #[test]
    fn oversized_column_index_is_rejected() {
        let mut v = brother_record();
        v["error_selector"]["page_column"] = json!(u64::MAX);
        assert!(matches!(
            check(&v, &BROTHER),
            Err(SchemaViolation::WrongKind { ref path, found: "number", .. }) if path == "error_selector.page_column"
        ));
        assert!(DeviceConfig::from_value(v).is_err());

        let mut v = brother_record();
        v["error_selector"]["error_column"] = json!(MAX_COLUMN_INDEX);
        assert_eq!(check(&v, &BROTHER), Ok(()));
    }

    #[test]
    fn optional_selectors_are_still_shape_checked() {
        let v = json!({
            "printer_name": "lobby",
            "default_url": "http://10.0.0.5/",
            "info_url": "http://10.0.0.5/info",
            "model_selector": {"tag": "dt", "label": "Model Name"},
        });
        assert_eq!(
            check(&v, &BASE),
            Err(SchemaViolation::Missing { path: s!("model_selector.value_tag") })
        );
    }

    #[test]
    fn endpoints_must_be_http_urls() {
        let mut v = brother_record();
        v["default_url"] = json!("192.168.0.33");
        assert!(matches!(check(&v, &BROTHER), Err(SchemaViolation::InvalidUrl { .. })));

        v["default_url"] = json!("ftp://192.168.0.33/");
        assert!(matches!(check(&v, &BROTHER), Err(SchemaViolation::InvalidUrl { .. })));
    }

    #[test]
    fn non_object_record_is_rejected() {
        assert!(matches!(
            check(&json!([1, 2]), &BASE),
            Err(SchemaViolation::WrongKind { found: "array", .. })
        ));
    }
}
