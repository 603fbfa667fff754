// src/table.rs
//
// In-memory shape of a notification spreadsheet.
//
// - Value:  one cell (text, number, boolean, date-time serial, or empty).
// - Record: one row, positionally aligned with its table's columns.
// - Table:  ordered records under a fixed column list (the schema).
//
// Invariant: every record in a table has exactly `columns.len()` cells.

use std::collections::HashMap;
use std::fmt;

use crate::core::sanitize::normalize_key;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel serial date (days since 1899-12-30, fraction = time of day).
    DateTime(f64),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Number(n) | Value::DateTime(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{n:.0}")
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

pub type Record = Vec<Value>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// A table with no columns and no rows (what an absent archive loads as).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from rows; each row is padded or cut to the schema width.
    pub fn from_rows(columns: Vec<String>, rows: impl IntoIterator<Item = Record>) -> Self {
        let mut t = Self::new(columns);
        for row in rows {
            t.push(row);
        }
        t
    }

    pub fn push(&mut self, mut row: Record) {
        row.resize(self.columns.len(), Value::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] { &self.columns }
    pub fn rows(&self) -> &[Record] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell lookup by row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let ix = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(ix))
    }

    /// Normalized key text of `column` for every row, in row order.
    /// None if the column does not exist.
    pub fn keys<'a>(&'a self, column: &str) -> Option<impl Iterator<Item = String> + use<'a>> {
        let ix = self.column_index(column)?;
        Some(self.rows.iter().map(move |r| key_of(&r[ix])))
    }

    /// Re-shape rows under `schema`. Columns this table lacks come out empty;
    /// columns not in `schema` are dropped.
    pub fn project(&self, schema: &[String]) -> Table {
        if schema == self.columns.as_slice() {
            return self.clone();
        }
        let by_name: HashMap<&str, usize> =
            self.columns.iter().enumerate().map(|(i, c)| (c.as_str(), i)).collect();
        let picks: Vec<Option<usize>> =
            schema.iter().map(|c| by_name.get(c.as_str()).copied()).collect();

        let rows = self.rows.iter().map(|r| {
            picks
                .iter()
                .map(|p| p.and_then(|i| r.get(i).cloned()).unwrap_or_default())
                .collect()
        });
        Table::from_rows(schema.to_vec(), rows)
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }
}

/// Business-key text for a cell.
pub fn key_of(v: &Value) -> String {
    normalize_key(&v.to_string())
}
