// src/store.rs
//
// The archive on disk: one workbook, read whole at start, replaced whole at end.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::config::consts::KEY_COLUMN;
use crate::error::{ExportError, Result};
use crate::table::Table;
use crate::xlsx;

/// Load the archive. No file yet means an empty archive, not an error.
pub fn load(path: &Path) -> Result<Table> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logf!("store: no archive at {}", path.display());
            return Ok(Table::empty());
        }
        Err(e) => return Err(ExportError::storage(path, e)),
    };

    let table = xlsx::read_table(&bytes).map_err(|e| match e {
        ExportError::Decode(msg) => ExportError::Decode(format!("{}: {msg}", path.display())),
        other => other,
    })?;

    if !table.is_empty() && !table.has_column(KEY_COLUMN) {
        loge!("store: archive {} has no {} column", path.display(), KEY_COLUMN);
        return Err(ExportError::Schema(KEY_COLUMN.to_string()));
    }
    logf!("store: loaded {} records from {}", table.len(), path.display());
    Ok(table)
}

/// Replace the archive with `table`. The workbook is written next to the
/// destination and renamed over it, so readers never see a partial file.
pub fn save(path: &Path, table: &Table) -> Result<()> {
    let bytes = xlsx::encode(table).map_err(|e| ExportError::storage(path, e))?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    ensure_directory(dir)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ExportError::storage(path, e))?;
    tmp.write_all(&bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| ExportError::storage(path, e))?;
    tmp.persist(path).map_err(|e| ExportError::storage(path, e.error))?;

    logf!("store: wrote {} records ({} bytes) to {}", table.len(), bytes.len(), path.display());
    Ok(())
}

/// Create `dir` (and parents) if missing. Returns true if it was created.
pub fn ensure_directory(dir: &Path) -> Result<bool> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(ExportError::storage(dir, "path exists but is not a directory"));
        }
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|e| ExportError::storage(dir, e))?;
    logf!("store: created {}", dir.display());
    Ok(true)
}
