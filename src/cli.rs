// src/cli.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::config::consts::{DEFAULT_DEVICES_DIR, DEFAULT_REPORT_DIR, HTTP_TIMEOUT_SECS, STORE_DIR};
use crate::config::options::{NetOptions, RunOptions};
use crate::core::HttpFetcher;
use crate::device::loader;
use crate::logging;
use crate::progress::Progress;
use crate::report::{self, TextReport};
use crate::runner;
use crate::session::SessionResult;

/// Poll printer status pages and report new error-history entries.
#[derive(Parser, Debug)]
#[command(name = "printwatch", version, about)]
pub struct Args {
    /// Directory of per-device JSON records
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DEVICES_DIR)]
    pub devices: PathBuf,

    /// Where report files are written
    #[arg(long, value_name = "DIR", default_value = DEFAULT_REPORT_DIR)]
    pub reports: PathBuf,

    /// Baselines and debug log
    #[arg(long, value_name = "DIR", default_value = STORE_DIR)]
    pub store: PathBuf,

    /// Per-request HTTP timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Validate device records, list the active ones, and exit
    #[arg(long)]
    pub list: bool,

    /// Debug-level log file
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            devices_dir: self.devices.clone(),
            report_dir: self.reports.clone(),
            store_dir: self.store.clone(),
            net: NetOptions {
                timeout: Duration::from_secs(self.timeout),
                ..NetOptions::default()
            },
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let opts = args.options();

    logging::init(&opts.log_path(), args.verbose)
        .wrap_err_with(|| format!("cannot open log file {}", opts.log_path().display()))?;

    if args.list {
        return list_devices(&opts.devices_dir);
    }

    let fetcher = HttpFetcher::new(&opts.net).wrap_err("cannot build HTTP client")?;
    let emitter = TextReport::new(&opts.report_dir);
    let mut console = ConsoleProgress::default();

    let summary = runner::run(&opts, &fetcher, &emitter, Some(&mut console))
        .wrap_err_with(|| format!("cannot load devices from {}", opts.devices_dir.display()))?;

    println!(
        "\n{} reported, {} failed, {} skipped",
        summary.reports.len(),
        summary.failed.len(),
        summary.excluded.len()
    );
    Ok(())
}

fn list_devices(dir: &Path) -> Result<()> {
    let loaded = loader::load_dir(dir)
        .wrap_err_with(|| format!("cannot load devices from {}", dir.display()))?;
    for cfg in &loaded.active {
        println!(
            "{}\t{}\t{}\t{}",
            cfg.name,
            cfg.family.as_deref().unwrap_or("-"),
            cfg.status_url,
            cfg.detail_url
        );
    }
    for ex in &loaded.excluded {
        eprintln!("skipped {}: {}", ex.path.display(), ex.reason);
    }
    Ok(())
}

/// Prints each device's report to stdout as it completes.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        if total == 0 {
            println!("No active devices.");
        }
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn device_done(&mut self, result: &SessionResult, path: &Path) {
        self.done += 1;
        println!("\n[{}/{}] {}", self.done, self.total, result.device_name);
        print!("{}", report::render(result));
        println!("Report saved as {}", path.display());
    }

    fn device_failed(&mut self, name: &str, reason: &str) {
        self.done += 1;
        eprintln!("\n[{}/{}] {name}: {reason}", self.done, self.total);
    }
}
