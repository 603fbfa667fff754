// src/runner.rs
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    config::Settings,
    error::{ExportError, Result},
    merge::merge,
    portal,
    progress::{Phase, Progress},
    store,
    table::Table,
    xlsx,
};

/// What a successful run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub archive_path: PathBuf,
    /// Archive size before this run.
    pub previous_total: usize,
    /// Archive size after this run.
    pub total: usize,
    pub new_entries: Table,
}

impl RunSummary {
    pub fn new_count(&self) -> usize {
        self.new_entries.len()
    }
}

/// Top-level pipeline: login, download, decode, load archive, merge, save.
/// Stops at the first failure; the archive is only written after the merge.
pub fn run(settings: &Settings, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    run_until(settings, progress, &AtomicBool::new(false))
}

/// Like [`run`], but gives up with [`ExportError::Interrupted`] once `stop`
/// is set. The flag is checked between phases, so a save in progress is
/// always allowed to finish.
pub fn run_until(
    settings: &Settings,
    mut progress: Option<&mut dyn Progress>,
    stop: &AtomicBool,
) -> Result<RunSummary> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(Phase::ALL.len());
    }
    let out = run_phases(settings, &mut progress, stop);
    if let Err(e) = &out {
        loge!("run failed ({}): {}", e.kind(), e);
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    out
}

fn run_phases(
    settings: &Settings,
    progress: &mut Option<&mut dyn Progress>,
    stop: &AtomicBool,
) -> Result<RunSummary> {
    checkpoint(stop)?;
    report(progress, "Logging in...");
    let session = portal::authenticate(
        &settings.login_page_url,
        &settings.login_submit_url,
        &settings.credentials,
        settings.timeout,
    )?;
    report(progress, "Logged in.");
    done(progress, Phase::Login);

    checkpoint(stop)?;
    report(progress, "Downloading notifications export...");
    let bytes = portal::fetch_export(&session, &settings.export_url)?;
    done(progress, Phase::Export);

    checkpoint(stop)?;
    let batch = xlsx::decode(&bytes)?;
    report(progress, &format!("Export decoded: {} records.", batch.len()));
    done(progress, Phase::Decode);

    checkpoint(stop)?;
    let archive = store::load(&settings.archive_path)?;
    if archive.is_empty() {
        report(progress, "No previous archive found, starting a new one.");
    } else {
        report(progress, &format!("Existing archive loaded: {} records.", archive.len()));
    }
    done(progress, Phase::LoadArchive);

    checkpoint(stop)?;
    let outcome = merge(&archive, &batch)?;
    report(progress, &format!("Unique records: {}.", outcome.unique.len()));
    done(progress, Phase::Merge);

    checkpoint(stop)?;
    store::save(&settings.archive_path, &outcome.unique)?;
    report(progress, &format!("Archive saved to {}.", settings.archive_path.display()));
    done(progress, Phase::Save);

    Ok(RunSummary {
        archive_path: settings.archive_path.clone(),
        previous_total: archive.len(),
        total: outcome.unique.len(),
        new_entries: outcome.new_entries,
    })
}

fn checkpoint(stop: &AtomicBool) -> Result<()> {
    if stop.load(Ordering::SeqCst) {
        return Err(ExportError::Interrupted);
    }
    Ok(())
}

fn report(progress: &mut Option<&mut dyn Progress>, msg: &str) {
    if let Some(p) = progress.as_deref_mut() {
        p.log(msg);
    }
}

fn done(progress: &mut Option<&mut dyn Progress>, phase: Phase) {
    logd!("phase {} done", phase);
    if let Some(p) = progress.as_deref_mut() {
        p.phase_done(phase);
    }
}
