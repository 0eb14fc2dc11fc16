//! Normalized table structure shared by every pipeline stage.

use chrono::NaiveDateTime;

use crate::column_kind::ColumnKind;

/// A single cell value.
///
/// Absence is an explicit marker, never an empty string: normalization
/// guarantees no `Text("")` survives into a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Explicit absence-of-value marker.
    Missing,
    /// Numeric value.
    Number(f64),
    /// Text value (non-empty after normalization).
    Text(String),
    /// Date or datetime value.
    Timestamp(NaiveDateTime),
    /// Boolean-like value.
    Bool(bool),
}

impl Cell {
    /// Returns true for the missing marker.
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }

    /// Text view of the cell, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Timestamp view of the cell, if it is temporal.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Display label used when the cell acts as a grouping key.
    pub fn label(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Cell::Text(s) => s.clone(),
            Cell::Timestamp(ts) => ts.format("%Y-%m-%d").to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

/// A named column of cells with a single inferred kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (trimmed, unique within its table).
    pub name: String,
    /// Inferred kind, computed once after normalization.
    pub kind: ColumnKind,
    /// Cell values; same length as every other column in the table.
    pub cells: Vec<Cell>,
}

impl Column {
    /// Create a new column.
    pub const fn new(name: String, kind: ColumnKind, cells: Vec<Cell>) -> Self {
        Self { name, kind, cells }
    }

    /// Fraction of cells that are missing (0.0 for an empty column).
    pub fn missing_ratio(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let missing = self.cells.iter().filter(|c| c.is_missing()).count();
        missing as f64 / self.cells.len() as f64
    }

    /// Returns true if every cell is the missing marker.
    pub fn is_all_missing(&self) -> bool {
        self.cells.iter().all(Cell::is_missing)
    }
}

/// An ordered sequence of equal-length named columns.
///
/// Built once per ingested source. Downstream components treat it as
/// read-only except for the documented one-shot temporal conversion in
/// [`crate::temporal::detect_time_column`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Columns in original source order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a new empty table.
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Returns true if the table has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of rows (0 for an empty table).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    /// Number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Mutable lookup by name.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of columns with the given kind, in table order.
    pub fn columns_of_kind(&self, kind: ColumnKind) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Drop rows where every cell is missing, then columns where every
    /// remaining cell is missing. Idempotent: pruning a pruned table is a
    /// no-op.
    pub fn prune_empty(&mut self) {
        let num_rows = self.num_rows();
        if num_rows == 0 {
            // A headers-only table keeps its (empty) columns.
            return;
        }

        let keep_row: Vec<bool> = (0..num_rows)
            .map(|row| self.columns.iter().any(|c| !c.cells[row].is_missing()))
            .collect();

        if keep_row.iter().any(|&k| !k) {
            for col in &mut self.columns {
                let mut row = 0;
                col.cells.retain(|_| {
                    let keep = keep_row[row];
                    row += 1;
                    keep
                });
            }
        }

        self.columns.retain(|c| !c.is_all_missing());
    }
}
