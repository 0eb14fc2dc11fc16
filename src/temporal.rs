//! Temporal column detection.
//!
//! Scans columns in table order and promotes the first one that holds
//! date/time values. Text columns are evaluated with three gates that
//! jointly reject columns with only incidental date-like content: parse
//! ratio, plausible-year ratio and distinct-year count.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::column_kind::ColumnKind;
use crate::table::{Cell, Table};

/// Minimum fraction of non-missing cells that must parse as dates.
const MIN_PARSE_RATIO: f64 = 0.8;

/// Minimum fraction of parsed values whose year must be plausible.
const MIN_YEAR_RATIO: f64 = 0.95;

/// Years outside this window count against [`MIN_YEAR_RATIO`].
const YEAR_MIN: i32 = 1900;
const YEAR_MAX: i32 = 2100;

/// A column must span at least this many distinct years.
const MIN_DISTINCT_YEARS: usize = 3;

/// Datetime formats attempted before the date-only formats.
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%SZ",
    "%d/%m/%Y %H:%M:%S",
];

/// Date-only formats, most common first.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
];

/// Best-effort parse of one cell into a timestamp.
pub fn parse_temporal(s: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Find the single best temporal column, converting it in place.
///
/// Columns are evaluated in table order and the first qualifying one
/// wins; there is no scoring across columns. Numeric columns are never
/// candidates, so integer IDs or year-like measurements cannot be
/// misread as dates. On success the selected column's cells are replaced
/// with parsed timestamps (unparseable cells become missing), its kind
/// becomes `Temporal`, and its name is returned. This is the only
/// mutation any pipeline stage performs on a table, and it happens at
/// most once, on at most one column; callers must run detection before
/// suggestion or rendering read the table.
pub fn detect_time_column(table: &mut Table) -> Option<String> {
    for idx in 0..table.columns.len() {
        let column = &table.columns[idx];
        match column.kind {
            ColumnKind::Temporal => return Some(column.name.clone()),
            ColumnKind::Text => {
                if let Some(parsed) = qualify_text_column(&column.cells) {
                    let column = &mut table.columns[idx];
                    column.cells = parsed;
                    column.kind = ColumnKind::Temporal;
                    return Some(column.name.clone());
                }
            }
            // Numbers are never implicit dates; booleans and all-missing
            // columns carry no temporal signal.
            ColumnKind::Numeric | ColumnKind::Boolean | ColumnKind::Unknown => {}
        }
    }
    None
}

/// Evaluate a text column against the three acceptance gates, returning
/// its converted cells when it qualifies.
fn qualify_text_column(cells: &[Cell]) -> Option<Vec<Cell>> {
    let mut non_missing = 0usize;
    let mut parsed_cells: Vec<Cell> = Vec::with_capacity(cells.len());
    let mut parsed: Vec<NaiveDateTime> = Vec::new();

    for cell in cells {
        match cell {
            Cell::Text(s) => {
                non_missing += 1;
                match parse_temporal(s) {
                    Some(dt) => {
                        parsed.push(dt);
                        parsed_cells.push(Cell::Timestamp(dt));
                    }
                    None => parsed_cells.push(Cell::Missing),
                }
            }
            _ => parsed_cells.push(Cell::Missing),
        }
    }

    if non_missing == 0 {
        return None;
    }

    let parse_ratio = parsed.len() as f64 / non_missing as f64;
    if parse_ratio <= MIN_PARSE_RATIO {
        return None;
    }

    let plausible = parsed
        .iter()
        .filter(|dt| (YEAR_MIN..=YEAR_MAX).contains(&dt.year()))
        .count();
    if plausible as f64 / parsed.len() as f64 <= MIN_YEAR_RATIO {
        return None;
    }

    let mut years: Vec<i32> = parsed.iter().map(Datelike::year).collect();
    years.sort_unstable();
    years.dedup();
    if years.len() < MIN_DISTINCT_YEARS {
        return None;
    }

    Some(parsed_cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn text_column(name: &str, values: &[&str]) -> Column {
        Column::new(
            name.to_string(),
            ColumnKind::Text,
            values.iter().map(|v| Cell::Text(v.to_string())).collect(),
        )
    }

    fn numeric_column(name: &str, values: &[f64]) -> Column {
        Column::new(
            name.to_string(),
            ColumnKind::Numeric,
            values.iter().map(|&v| Cell::Number(v)).collect(),
        )
    }

    #[test]
    fn test_parse_temporal_formats() {
        assert!(parse_temporal("2024-03-15").is_some());
        assert!(parse_temporal("2024/03/15").is_some());
        assert!(parse_temporal("03/15/2024").is_some());
        assert!(parse_temporal("15.03.2024").is_some());
        assert!(parse_temporal("2024-03-15 10:30:00").is_some());
        assert!(parse_temporal("2024-03-15T10:30:00").is_some());
        assert!(parse_temporal("Mar 15, 2024").is_some());
        assert!(parse_temporal("not a date").is_none());
        assert!(parse_temporal("12345").is_none());
    }

    #[test]
    fn test_accepts_text_dates_spanning_years() {
        let mut table = Table {
            columns: vec![text_column(
                "when",
                &["2021-05-01", "2022-05-01", "2023-05-01", "2024-05-01"],
            )],
        };

        let found = detect_time_column(&mut table);
        assert_eq!(found.as_deref(), Some("when"));

        let when = table.column("when").unwrap();
        assert_eq!(when.kind, ColumnKind::Temporal);
        assert!(when.cells.iter().all(|c| c.as_timestamp().is_some()));
    }

    #[test]
    fn test_never_selects_numeric_column() {
        // Small integers resembling years must not be treated as dates.
        let mut table = Table {
            columns: vec![numeric_column("year", &[2001.0, 2002.0, 2003.0])],
        };

        assert_eq!(detect_time_column(&mut table), None);
        assert_eq!(table.column("year").unwrap().kind, ColumnKind::Numeric);
    }

    #[test]
    fn test_rejects_two_distinct_years() {
        // 100% parse success is not enough without three distinct years.
        let mut table = Table {
            columns: vec![text_column(
                "d",
                &["2023-01-01", "2023-06-01", "2024-01-01", "2024-06-01"],
            )],
        };

        assert_eq!(detect_time_column(&mut table), None);
        assert_eq!(table.column("d").unwrap().kind, ColumnKind::Text);
    }

    #[test]
    fn test_rejects_low_parse_ratio() {
        let mut table = Table {
            columns: vec![text_column(
                "mixed",
                &["2021-01-01", "2022-01-01", "2023-01-01", "alpha", "beta"],
            )],
        };

        // 3/5 parse ratio is below the 0.8 gate.
        assert_eq!(detect_time_column(&mut table), None);
    }

    #[test]
    fn test_rejects_implausible_years() {
        let mut table = Table {
            columns: vec![text_column(
                "d",
                &["0001-01-01", "0002-01-01", "0003-01-01"],
            )],
        };

        assert_eq!(detect_time_column(&mut table), None);
    }

    #[test]
    fn test_first_qualifying_column_wins() {
        let mut table = Table {
            columns: vec![
                text_column("note", &["alpha", "beta", "gamma"]),
                text_column("a", &["2021-01-01", "2022-01-01", "2023-01-01"]),
                text_column("b", &["2019-01-01", "2020-01-01", "2021-01-01"]),
            ],
        };

        assert_eq!(detect_time_column(&mut table).as_deref(), Some("a"));
        // Later candidates stay untouched.
        assert_eq!(table.column("b").unwrap().kind, ColumnKind::Text);
    }

    #[test]
    fn test_already_temporal_column_accepted() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut table = Table {
            columns: vec![Column::new(
                "ts".to_string(),
                ColumnKind::Temporal,
                vec![Cell::Timestamp(ts)],
            )],
        };

        assert_eq!(detect_time_column(&mut table).as_deref(), Some("ts"));
    }

    #[test]
    fn test_missing_cells_excluded_from_ratio() {
        let mut table = Table {
            columns: vec![Column::new(
                "d".to_string(),
                ColumnKind::Text,
                vec![
                    Cell::Text("2021-01-01".into()),
                    Cell::Missing,
                    Cell::Text("2022-01-01".into()),
                    Cell::Missing,
                    Cell::Text("2023-01-01".into()),
                ],
            )],
        };

        // 3/3 non-missing parse; missing cells do not dilute the ratio.
        assert_eq!(detect_time_column(&mut table).as_deref(), Some("d"));
    }
}
