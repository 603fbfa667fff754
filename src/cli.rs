// src/cli.rs
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Settings;
use crate::error::ExportError;
use crate::progress::{Phase, Progress};
use crate::runner::{self, RunSummary};
use crate::store;

pub const HELP: &str = include_str!("cli_help.txt");

/// Set by the Ctrl-C handler; the runner stops at the next phase boundary.
static STOP: AtomicBool = AtomicBool::new(false);

fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        STOP.store(true, Ordering::SeqCst);
        eprintln!("Interrupt received, stopping after the current step...");
    });
    if let Err(e) = installed {
        loge!("could not install Ctrl-C handler: {}", e);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run,
    Help,
}

/// The tool takes no options besides help.
pub fn parse_args<I, S>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cmd = Command::Run;
    for a in args {
        match a.as_ref() {
            "-h" | "--help" => cmd = Command::Help,
            other => return Err(format!("Unknown arg: {other} (try --help)")),
        }
    }
    Ok(cmd)
}

/// Prints progress lines to stdout.
pub struct ConsoleProgress {
    total: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self { total: Phase::ALL.len() }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn phase_done(&mut self, phase: Phase) {
        println!("[{}/{}] {} done", phase.ordinal(), self.total, phase);
    }
}

pub fn execute(cmd: Command) -> ExitCode {
    if cmd == Command::Help {
        println!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            report_failure(&e);
            eprintln!("Set FROTA162_USERNAME and FROTA162_PASSWORD (and the portal URLs) in config.env or the environment.");
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = settings.archive_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        match store::ensure_directory(dir) {
            Ok(true) => println!("Created folder {}.", dir.display()),
            Ok(false) => {}
            Err(e) => {
                report_failure(&e);
                return ExitCode::FAILURE;
            }
        }
    }

    install_interrupt_handler();
    println!("Starting notifications export...");
    let mut progress = ConsoleProgress::new();
    match runner::run_until(&settings, Some(&mut progress), &STOP) {
        Ok(summary) => {
            report_success(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

pub fn report_success(summary: &RunSummary) {
    println!("Done! New notifications imported: {}", summary.new_count());
    println!("Total unique records: {} (was {})", summary.total, summary.previous_total);
}

pub fn report_failure(e: &ExportError) {
    if matches!(e, ExportError::Interrupted) {
        eprintln!("Export interrupted by user. The archive was not changed.");
        return;
    }
    eprintln!("Error during export: {e}");
    eprintln!("Kind: {}", e.kind());
}
