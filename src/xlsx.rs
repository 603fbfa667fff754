// src/xlsx.rs
//
// Spreadsheet bytes <-> Table.
//
// Reading follows the conventions of a typical dataframe import: first sheet,
// first row is the header, blank rows skipped, short rows padded.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::config::consts::KEY_COLUMN;
use crate::core::sanitize::unique_headers;
use crate::error::{ExportError, Result};
use crate::table::{Table, Value};

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Decode a freshly exported batch. Besides parsing, a batch must have rows
/// and must carry the business key column.
pub fn decode(bytes: &[u8]) -> Result<Table> {
    let table = read_table(bytes)?;
    if table.is_empty() {
        return Err(ExportError::EmptyBatch);
    }
    if !table.has_column(KEY_COLUMN) {
        loge!("decode: columns are {:?}", table.columns());
        return Err(ExportError::Schema(KEY_COLUMN.to_string()));
    }
    logf!("decode: {} rows x {} columns", table.len(), table.columns().len());
    Ok(table)
}

/// Parse the first worksheet without any content checks.
/// A workbook whose first sheet is blank yields `Table::empty()`.
pub fn read_table(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ExportError::Decode(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExportError::Decode("workbook has no worksheets".into()))?
        .map_err(|e| ExportError::Decode(e.to_string()))?;

    Ok(range_to_table(&range))
}

fn range_to_table(range: &Range<Data>) -> Table {
    // The used range starts at the first non-empty column; columns are
    // still counted from A, so blank leading columns are padded back in.
    let lead = range.start().map_or(0, |(_, col)| col as usize);
    let padded = |r: &[Data]| -> Vec<Value> {
        std::iter::repeat_n(Value::Empty, lead).chain(r.iter().map(cell_value)).collect()
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::empty();
    };

    // The range is rectangular, so a data cell right of the last header
    // shows up as a blank header cell and gets an `Unnamed: <i>` name.
    let columns = unique_headers(padded(header).iter().map(Value::to_string));

    // Whitespace-only cells count as blank here but are kept as text.
    let body: Vec<Vec<Value>> = rows
        .map(padded)
        .filter(|r| !r.iter().all(Value::is_empty))
        .collect();

    Table::from_rows(columns, body)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::String(s) if s.is_empty() => Value::Empty,
        Data::String(s) => Value::Text(s.clone()),
        Data::Float(f) => Value::Number(*f),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(e.to_string()),
    }
}

/// Render a table as a single-sheet workbook with a bold header row.
pub fn encode(table: &Table) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();
    let date = Format::new().set_num_format(DATE_FORMAT);

    for (c, name) in table.columns().iter().enumerate() {
        sheet.write_string_with_format(0, col_num(c)?, name, &bold)?;
    }

    for (r, record) in table.rows().iter().enumerate() {
        let row = u32::try_from(r + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (c, value) in record.iter().enumerate() {
            let col = col_num(c)?;
            match value {
                Value::Empty => {}
                Value::Text(s) => { sheet.write_string(row, col, s)?; }
                Value::Number(n) => { sheet.write_number(row, col, *n)?; }
                Value::Bool(b) => { sheet.write_boolean(row, col, *b)?; }
                Value::DateTime(n) => { sheet.write_number_with_format(row, col, *n, &date)?; }
            }
        }
    }

    workbook.save_to_buffer()
}

fn col_num(c: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)
}
