// src/lib.rs

#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod merge;
pub mod portal;
pub mod progress;
pub mod runner;
pub mod store;
pub mod table;
pub mod xlsx;

pub use error::{ErrorKind, ExportError};
pub use merge::{merge, MergeOutcome};
pub use runner::{run, run_until, RunSummary};
pub use table::{Record, Table, Value};
