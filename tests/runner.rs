// tests/runner.rs
//
// Whole-directory runs: exclusion, per-device isolation, reporting.
mod common;

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use common::*;
use printwatch::config::RunOptions;
use printwatch::error::{ConfigError, FetchError, SchemaViolation};
use printwatch::progress::Progress;
use printwatch::report::TextReport;
use printwatch::runner;
use printwatch::session::SessionResult;
use serde_json::json;
use tempfile::TempDir;

fn write_device(opts: &RunOptions, file: &str, record: &serde_json::Value) {
    fs::create_dir_all(&opts.devices_dir).unwrap();
    fs::write(opts.devices_dir.join(file), serde_json::to_string_pretty(record).unwrap()).unwrap();
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn device_done(&mut self, result: &SessionResult, _report: &Path) {
        self.done.push(result.device_name.clone());
    }
    fn device_failed(&mut self, name: &str, _reason: &str) {
        self.failed.push(name.to_string());
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn invalid_record_never_becomes_a_session() {
    let tmp = TempDir::new().unwrap();
    let opts = RunOptions::rooted_at(tmp.path());
    write_device(&opts, "office-2f.json", &office_record());
    write_device(
        &opts,
        "lobby.json",
        &json!({ "printer_name": "lobby", "default_url": "http://10.0.0.9/" }),
    );

    let info = information(&THREE);
    let served = pages(info);
    let requested = RefCell::new(Vec::new());
    let fetch = |url: &str| -> Result<String, FetchError> {
        requested.borrow_mut().push(url.to_string());
        served(url)
    };
    let emitter = TextReport::new(&opts.report_dir);
    let mut rec = Recorder::default();

    let summary = runner::run(&opts, &fetch, &emitter, Some(&mut rec)).unwrap();

    assert_eq!(summary.excluded.len(), 1);
    let ex = &summary.excluded[0];
    assert!(ex.path.ends_with("lobby.json"));
    assert!(matches!(
        &ex.reason,
        ConfigError::Schema { violation: SchemaViolation::Missing { path }, .. } if path == "info_url"
    ));

    assert_eq!(rec.total, 1);
    assert_eq!(rec.done, vec!["office-2f"]);
    assert!(rec.finished);
    assert!(requested.borrow().iter().all(|u| !u.contains("10.0.0.9")));
    assert_eq!(summary.reports.len(), 1);
    assert!(summary.reports[0].exists());
}

#[test]
fn one_unreachable_device_does_not_stop_the_others() {
    let tmp = TempDir::new().unwrap();
    let opts = RunOptions::rooted_at(tmp.path());

    let mut lab = office_record();
    lab["printer_name"] = json!("lab");
    lab["default_url"] = json!("http://10.0.0.7/");
    lab["info_url"] = json!("http://10.0.0.7/general/information.html?kind=item");
    write_device(&opts, "a-lab.json", &lab);
    write_device(&opts, "b-office.json", &office_record());

    let fetch = pages(information(&THREE));
    let emitter = TextReport::new(&opts.report_dir);
    let mut rec = Recorder::default();

    let summary = runner::run(&opts, &fetch, &emitter, Some(&mut rec)).unwrap();

    assert_eq!(rec.total, 2);
    assert_eq!(rec.failed, vec!["lab"]);
    assert_eq!(rec.done, vec!["office-2f"]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "lab");
    assert_eq!(summary.results.len(), 1);
    assert!(opts.store_dir.join(format!("stored_errors_{SERIAL}.json")).exists());

    let baselines: Vec<PathBuf> = fs::read_dir(&opts.store_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "json"))
        .collect();
    assert_eq!(baselines.len(), 1);
}

#[test]
fn reports_name_the_outcome() {
    let tmp = TempDir::new().unwrap();
    let opts = RunOptions::rooted_at(tmp.path());
    write_device(&opts, "office-2f.json", &office_record());
    let emitter = TextReport::new(&opts.report_dir);

    let first = runner::run(&opts, &pages(information(&THREE)), &emitter, None).unwrap();
    let text = fs::read_to_string(&first.reports[0]).unwrap();
    assert!(text.contains("Printer Name: office-2f"));
    assert!(text.contains("Initial Errors:"));

    let again = runner::run(&opts, &pages(information(&THREE)), &emitter, None).unwrap();
    let text = fs::read_to_string(&again.reports[0]).unwrap();
    assert!(text.contains("No new errors."));
    assert!(!text.contains("Initial Errors:"));
}

#[test]
fn missing_devices_dir_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let opts = RunOptions::rooted_at(tmp.path());
    let emitter = TextReport::new(&opts.report_dir);
    let fetch = pages(String::new());

    let err = runner::run(&opts, &fetch, &emitter, None).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
