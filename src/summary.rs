//! Compact textual profile of a table.

use std::fmt;

use crate::table::Table;

/// Column names listed before truncation.
const MAX_LISTED_COLUMNS: usize = 20;

/// Missing-value entries reported.
const TOP_MISSING: usize = 5;

/// Row/column counts plus the most incomplete columns.
///
/// Derived and short-lived: recompute whenever the source table changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of data rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// First [`MAX_LISTED_COLUMNS`] column names, table order.
    pub column_names: Vec<String>,
    /// True when `column_names` was cut short.
    pub truncated: bool,
    /// Top missing-value columns as `(name, ratio)`, ratio descending,
    /// original column order on ties.
    pub top_missing: Vec<(String, f64)>,
}

/// Profile a table. Total: the empty table yields zero counts and empty
/// listings rather than an error.
pub fn summarize(table: &Table) -> Summary {
    let column_names: Vec<String> = table
        .columns
        .iter()
        .take(MAX_LISTED_COLUMNS)
        .map(|c| c.name.clone())
        .collect();

    let mut ratios: Vec<(String, f64)> = table
        .columns
        .iter()
        .map(|c| (c.name.clone(), round3(c.missing_ratio())))
        .collect();
    // Stable sort keeps table order within equal ratios.
    ratios.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ratios.truncate(TOP_MISSING);

    Summary {
        rows: table.num_rows(),
        columns: table.num_columns(),
        truncated: table.num_columns() > MAX_LISTED_COLUMNS,
        column_names,
        top_missing: ratios,
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}, Columns: {}", self.rows, self.columns)?;

        let mut names = self.column_names.join(", ");
        if self.truncated {
            names.push_str("...");
        }
        writeln!(f, "Columns: {names}")?;

        let missing = self
            .top_missing
            .iter()
            .map(|(name, ratio)| format!("{}: {:.0}%", name, ratio * 100.0))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Top missing-value columns: {missing}")
    }
}
