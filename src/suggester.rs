//! Chart suggestion heuristics.
//!
//! A deterministic, explainable rule list rather than an optimizer: each
//! rule independently appends at most one spec, in fixed priority order,
//! and "first" always means leftmost in original column order.

use crate::chart_spec::ChartSpec;
use crate::column_kind::ColumnKind;
use crate::table::Table;

/// Produce an ordered list of chart specifications for a table.
///
/// `time_column` is the result of [`crate::temporal::detect_time_column`],
/// which must have run (and performed its one-shot conversion) before
/// this function reads the table. Pure function of its inputs.
///
/// The result is never empty when the table has at least one numeric
/// column, and always empty when it has none.
pub fn suggest_charts(table: &Table, time_column: Option<&str>) -> Vec<ChartSpec> {
    let numeric = table.columns_of_kind(ColumnKind::Numeric);
    let categorical: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| c.kind == ColumnKind::Text && Some(c.name.as_str()) != time_column)
        .map(|c| c.name.as_str())
        .collect();

    let mut specs = Vec::new();

    // Time series first when both an axis and a measure exist.
    if let (Some(time), Some(&y)) = (time_column, numeric.first()) {
        specs.push(ChartSpec::line(time, y));
    }

    // Category vs measure: a bar for magnitudes, a pie for shares.
    if let (Some(&cat), Some(&y)) = (categorical.first(), numeric.first()) {
        specs.push(ChartSpec::bar(cat, y));
        specs.push(ChartSpec::pie(cat, y));
    }

    // Fallback: relate the first two numeric columns.
    if specs.is_empty() && numeric.len() >= 2 {
        specs.push(ChartSpec::bar(numeric[0], numeric[1]));
    }

    // Last resort: first column of any kind against the first measure.
    if specs.is_empty()
        && let (Some(first), Some(&y)) = (table.columns.first(), numeric.first())
    {
        specs.push(ChartSpec::bar(&first.name, y));
    }

    specs
}
