// src/error.rs
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a run. Each phase fails fast with one of these.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("missing configuration: {}", .0.join(", "))]
    ConfigMissing(Vec<String>),

    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("anti-forgery token `{0}` not found in the login page")]
    AuthTokenMissing(String),

    #[error("login rejected, still on {0}")]
    AuthenticationFailed(String),

    #[error("export response is empty or too small ({len} bytes, need at least {min})")]
    EmptyExport { len: usize, min: usize },

    #[error("could not read spreadsheet: {0}")]
    Decode(String),

    #[error("exported spreadsheet has no rows")]
    EmptyBatch,

    #[error("column `{0}` not found")]
    Schema(String),

    #[error("could not access archive {}: {reason}", .path.display())]
    Storage { path: PathBuf, reason: String },

    #[error("interrupted by user")]
    Interrupted,
}

/// Flat tag for an [`ExportError`], used when reporting at the top level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigMissing,
    TransportError,
    AuthTokenMissing,
    AuthenticationFailed,
    EmptyExportError,
    DecodeError,
    EmptyBatchError,
    SchemaError,
    StorageError,
    Interrupted,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::ConfigMissing => "ConfigMissing",
            ErrorKind::TransportError => "TransportError",
            ErrorKind::AuthTokenMissing => "AuthTokenMissing",
            ErrorKind::AuthenticationFailed => "AuthenticationFailed",
            ErrorKind::EmptyExportError => "EmptyExportError",
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::EmptyBatchError => "EmptyBatchError",
            ErrorKind::SchemaError => "SchemaError",
            ErrorKind::StorageError => "StorageError",
            ErrorKind::Interrupted => "Interrupted",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ExportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::ConfigMissing(_) => ErrorKind::ConfigMissing,
            ExportError::Transport { .. } => ErrorKind::TransportError,
            ExportError::AuthTokenMissing(_) => ErrorKind::AuthTokenMissing,
            ExportError::AuthenticationFailed(_) => ErrorKind::AuthenticationFailed,
            ExportError::EmptyExport { .. } => ErrorKind::EmptyExportError,
            ExportError::Decode(_) => ErrorKind::DecodeError,
            ExportError::EmptyBatch => ErrorKind::EmptyBatchError,
            ExportError::Schema(_) => ErrorKind::SchemaError,
            ExportError::Storage { .. } => ErrorKind::StorageError,
            ExportError::Interrupted => ErrorKind::Interrupted,
        }
    }

    pub(crate) fn transport(url: &str, reason: impl fmt::Display) -> Self {
        ExportError::Transport { url: url.to_string(), reason: reason.to_string() }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        ExportError::Storage { path: path.into(), reason: reason.to_string() }
    }
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_render_taxonomy_names() {
        let e = ExportError::EmptyExport { len: 50, min: 100 };
        assert_eq!(e.kind(), ErrorKind::EmptyExportError);
        assert_eq!(e.kind().to_string(), "EmptyExportError");
        assert!(e.to_string().contains("50 bytes"));
    }

    #[test]
    fn config_missing_lists_every_key() {
        let e = ExportError::ConfigMissing(vec!["USERNAME".into(), "PASSWORD".into()]);
        assert_eq!(e.to_string(), "missing configuration: USERNAME, PASSWORD");
    }

    #[test]
    fn interruption_has_its_own_kind() {
        let e = ExportError::Interrupted;
        assert_eq!(e.kind().name(), "Interrupted");
        assert_eq!(e.to_string(), "interrupted by user");
    }
}
