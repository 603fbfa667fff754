// tests/spreadsheet_io.rs
//
// Decoder and archive store against real workbook bytes.
//
use std::fs;
use std::path::PathBuf;

use frota162_export::{store, xlsx, ErrorKind, Table, Value};
use rust_xlsxwriter::Workbook;

/// Workbook with one sheet; `None` leaves a cell blank.
fn workbook(rows: &[&[Option<&str>]]) -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if let Some(text) = cell {
                ws.write_string(r as u32, c as u16, *text).unwrap();
            }
        }
    }
    wb.save_to_buffer().unwrap()
}

fn tmp_archive(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Resources").join(name);
    (dir, path)
}

/// Keep test runs from writing `.store/debug.log` into the crate.
fn quiet_log() {
    frota162_export::log::set_log_path(std::env::temp_dir().join("frota162_export-tests").join("debug.log"));
}

#[test]
fn decodes_header_and_rows_in_order() {
    quiet_log();
    let bytes = workbook(&[
        &[Some("AIT"), Some("Placa"), Some("Valor")],
        &[Some("A1001"), Some("ABC1D23"), Some("88,38")],
        &[None, None, None],
        &[Some("A1002"), Some("XYZ9K87"), None],
    ]);

    let t = xlsx::decode(&bytes).unwrap();

    assert_eq!(t.columns(), &["AIT", "Placa", "Valor"]);
    assert_eq!(t.len(), 2, "blank rows are skipped");
    assert_eq!(t.get(0, "AIT"), Some(&Value::from("A1001")));
    assert_eq!(t.get(1, "Placa"), Some(&Value::from("XYZ9K87")));
    assert_eq!(t.get(1, "Valor"), Some(&Value::Empty));
}

#[test]
fn batch_without_key_column_is_a_schema_error() {
    quiet_log();
    let bytes = workbook(&[
        &[Some("Auto"), Some("Placa")],
        &[Some("1001"), Some("ABC1D23")],
    ]);
    let err = xlsx::decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaError);
}

#[test]
fn header_only_batch_is_empty() {
    quiet_log();
    let bytes = workbook(&[&[Some("AIT"), Some("Placa")]]);
    assert_eq!(xlsx::decode(&bytes).unwrap_err().kind(), ErrorKind::EmptyBatchError);
}

#[test]
fn non_spreadsheet_bytes_fail_to_decode() {
    quiet_log();
    let junk = b"<html><body>Session expired</body></html>".repeat(10);
    assert_eq!(xlsx::decode(&junk).unwrap_err().kind(), ErrorKind::DecodeError);
}

#[test]
fn messy_headers_are_made_unique() {
    quiet_log();
    let bytes = workbook(&[
        &[Some("AIT"), None, Some("Placa"), Some("Placa")],
        &[Some("1"), Some("x"), Some("A"), Some("B"), Some("overflow")],
    ]);
    let t = xlsx::read_table(&bytes).unwrap();
    assert_eq!(t.columns(), &["AIT", "Unnamed: 1", "Placa", "Placa.1", "Unnamed: 4"]);
    assert_eq!(t.get(0, "Unnamed: 4"), Some(&Value::from("overflow")));
}

#[test]
fn blank_leading_column_is_kept() {
    quiet_log();
    let bytes = workbook(&[
        &[None, Some("AIT"), Some("Placa")],
        &[None, Some("1001"), Some("ABC1D23")],
    ]);
    let t = xlsx::decode(&bytes).unwrap();
    assert_eq!(t.columns(), &["Unnamed: 0", "AIT", "Placa"]);
    assert_eq!(t.get(0, "Unnamed: 0"), Some(&Value::Empty));
    assert_eq!(t.get(0, "AIT"), Some(&Value::from("1001")));
}

#[test]
fn whitespace_text_survives_but_blank_rows_do_not() {
    quiet_log();
    let bytes = workbook(&[
        &[Some("AIT"), Some("Obs")],
        &[Some("1001"), Some(" ")],
        &[Some("  "), None],
    ]);
    let t = xlsx::decode(&bytes).unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.get(0, "Obs"), Some(&Value::from(" ")));

    let (_dir, path) = tmp_archive("Notificacao162.xlsx");
    store::save(&path, &t).unwrap();
    assert_eq!(store::load(&path).unwrap().get(0, "Obs"), Some(&Value::from(" ")));
}

#[test]
fn absent_archive_loads_empty() {
    quiet_log();
    let (_dir, path) = tmp_archive("Notificacao162.xlsx");
    let t = store::load(&path).unwrap();
    assert!(t.is_empty());
    assert!(t.columns().is_empty());
}

#[test]
fn save_then_load_keeps_values_and_creates_folder() {
    quiet_log();
    let (_dir, path) = tmp_archive("Notificacao162.xlsx");
    let cols = ["AIT", "Valor", "Pago", "Data"].iter().map(|s| s.to_string()).collect();
    let table = Table::from_rows(cols, vec![
        vec!["1001".into(), Value::Number(88.38), Value::Bool(false), Value::DateTime(45292.5)],
        vec!["1002".into(), Value::Number(195.23), Value::Bool(true), Value::Empty],
    ]);

    store::save(&path, &table).unwrap();
    assert!(path.exists());

    let back = store::load(&path).unwrap();
    assert_eq!(back, table);
}

#[test]
fn save_replaces_previous_archive() {
    quiet_log();
    let (_dir, path) = tmp_archive("Notificacao162.xlsx");
    let cols: Vec<String> = vec!["AIT".into()];
    store::save(&path, &Table::from_rows(cols.clone(), vec![vec!["1".into()], vec!["2".into()]])).unwrap();
    store::save(&path, &Table::from_rows(cols, vec![vec!["3".into()]])).unwrap();

    let back = store::load(&path).unwrap();
    assert_eq!(back.keys("AIT").unwrap().collect::<Vec<_>>(), vec!["3"]);

    // No temp files left next to the archive
    let siblings = fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(siblings, 1);
}

#[test]
fn unwritable_destination_is_a_storage_error() {
    quiet_log();
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the folder should be
    let blocker = dir.path().join("Resources");
    fs::write(&blocker, b"not a folder").unwrap();
    let path = blocker.join("Notificacao162.xlsx");

    let table = Table::from_rows(vec!["AIT".into()], vec![vec!["1".into()]]);
    let err = store::save(&path, &table).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageError);
}

#[test]
fn corrupt_archive_is_reported() {
    quiet_log();
    let (_dir, path) = tmp_archive("Notificacao162.xlsx");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"definitely not a workbook, but long enough to look like one".repeat(4)).unwrap();
    assert_eq!(store::load(&path).unwrap_err().kind(), ErrorKind::DecodeError);
}
