// src/progress.rs
use std::fmt;

/// The fixed sequence of steps a run goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Login,
    Export,
    Decode,
    LoadArchive,
    Merge,
    Save,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Login,
        Phase::Export,
        Phase::Decode,
        Phase::LoadArchive,
        Phase::Merge,
        Phase::Save,
    ];

    /// 1-based position within [`Phase::ALL`].
    pub fn ordinal(self) -> usize {
        Phase::ALL.iter().position(|p| *p == self).map_or(0, |i| i + 1)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Login => "login",
            Phase::Export => "export download",
            Phase::Decode => "decode",
            Phase::LoadArchive => "load archive",
            Phase::Merge => "merge",
            Phase::Save => "save archive",
        };
        f.write_str(label)
    }
}

/// Progress reporting for a run. Frontends implement this to surface status.
pub trait Progress {
    /// Called once with the number of phases.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when a phase completes.
    fn phase_done(&mut self, _phase: Phase) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects everything it is told. Handy for tests and for callers that
/// want to replay progress later.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub messages: Vec<String>,
    pub phases: Vec<Phase>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn log(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }
    fn phase_done(&mut self, phase: Phase) {
        self.phases.push(phase);
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}
