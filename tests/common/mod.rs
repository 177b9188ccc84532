// tests/common/mod.rs
#![allow(dead_code)]

use printwatch::device::DeviceConfig;
use printwatch::error::FetchError;
use printwatch::store::Identity;
use serde_json::Value;

pub const STATUS: &str = include_str!("../fixtures/status.html");
const INFORMATION: &str = include_str!("../fixtures/information.html");
const OFFICE: &str = include_str!("../fixtures/office-2f.json");

pub const SERIAL: &str = "E78123A9N123456";

pub fn serial_id() -> Identity {
    Identity::Serial(SERIAL.to_string())
}

pub const STATUS_URL: &str = "http://192.168.0.33/";
pub const INFO_URL: &str = "http://192.168.0.33/general/information.html?kind=item";

/// Information page with the given error-history rows.
pub fn information(rows: &[(&str, &str)]) -> String {
    let mut html = String::from("        <tr><th>Error</th><th>Page</th></tr>\n");
    for (error, page) in rows {
        html.push_str(&format!("        <tr><td>{error}</td><td>Page : &#160;{page}</td></tr>\n"));
    }
    INFORMATION.replace("{{ROWS}}", &html)
}

pub fn office_record() -> Value {
    serde_json::from_str(OFFICE).unwrap()
}

pub fn office() -> DeviceConfig {
    DeviceConfig::from_value(office_record()).unwrap()
}

/// Serves the status fixture and `info` for the office printer's URLs.
pub fn pages(info: String) -> impl Fn(&str) -> Result<String, FetchError> {
    move |url: &str| match url {
        STATUS_URL => Ok(STATUS.to_string()),
        INFO_URL => Ok(info.clone()),
        other => Err(FetchError::Status { url: other.to_string(), status: 404 }),
    }
}

pub const THREE: [(&str, &str); 3] = [
    ("Replace Toner", "5120"),
    ("Paper Jam Tray 1", "4988"),
    ("Cover is Open", "4011"),
];
