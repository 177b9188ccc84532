// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod device;
pub mod diff;
pub mod error;
pub mod logging;
pub mod progress;
pub mod report;
pub mod runner;
pub mod schema;
pub mod session;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;
