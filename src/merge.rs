// src/merge.rs
//
// Archive + batch -> deduplicated archive + what was genuinely new.
//
// Rules:
// - An empty archive takes the batch as-is; every batch record is new.
// - Otherwise records are taken archive first, then batch, and only the first
//   record per business key survives. Archive values therefore win over a
//   re-exported record with the same key, and among batch duplicates the
//   earliest one wins.
// - New entries are the survivors whose key never appeared in the archive.
// - Schemas are unioned: archive columns, then batch-only columns in batch
//   order. Cells a record's source table did not have are left empty.

use std::collections::HashSet;

use crate::config::consts::KEY_COLUMN;
use crate::error::{ExportError, Result};
use crate::table::{key_of, Table};

#[derive(Clone, Debug, PartialEq)]
pub struct MergeOutcome {
    /// The new archive contents.
    pub unique: Table,
    /// Subset of `unique` whose keys were not in the old archive.
    pub new_entries: Table,
}

/// Merge on the `AIT` business key.
pub fn merge(archive: &Table, batch: &Table) -> Result<MergeOutcome> {
    merge_on(archive, batch, KEY_COLUMN)
}

/// Merge on an arbitrary key column. Fails only if a non-empty input lacks
/// the key column.
pub fn merge_on(archive: &Table, batch: &Table, key: &str) -> Result<MergeOutcome> {
    for t in [archive, batch] {
        if !t.is_empty() && !t.has_column(key) {
            return Err(ExportError::Schema(key.to_string()));
        }
    }

    if archive.is_empty() {
        logd!("merge: empty archive, all {} batch records are new", batch.len());
        return Ok(MergeOutcome { unique: batch.clone(), new_entries: batch.clone() });
    }

    let schema = union_schema(archive.columns(), batch.columns());
    let key_ix = schema.iter().position(|c| c == key).ok_or_else(|| ExportError::Schema(key.to_string()))?;

    let old = archive.project(&schema);
    let incoming = batch.project(&schema);

    let mut unique = Table::new(schema.clone());
    let mut new_entries = Table::new(schema);
    let mut seen: HashSet<String> = HashSet::with_capacity(old.len() + incoming.len());

    for row in old.into_rows() {
        if seen.insert(key_of(&row[key_ix])) {
            unique.push(row);
        }
    }
    let archive_rows = unique.len();

    // Everything `seen` holds so far came from the archive, so a batch record
    // that gets past it is new by construction.
    let mut repeats = 0usize;
    for row in incoming.into_rows() {
        if seen.insert(key_of(&row[key_ix])) {
            new_entries.push(row.clone());
            unique.push(row);
        } else {
            repeats += 1;
        }
    }

    if archive_rows < archive.len() {
        loge!("merge: archive carried {} duplicate keys, dropped", archive.len() - archive_rows);
    }
    logf!(
        "merge: archive {} + batch {} -> unique {} (new {}, already known {})",
        archive.len(), batch.len(), unique.len(), new_entries.len(), repeats
    );

    Ok(MergeOutcome { unique, new_entries })
}

fn union_schema(first: &[String], second: &[String]) -> Vec<String> {
    let mut out = first.to_vec();
    for c in second {
        if !out.contains(c) {
            out.push(c.clone());
        }
    }
    out
}
