//! Excel workbook extraction via calamine.
//!
//! Only the first worksheet is read. Cells are stringified and fed through
//! the same normalization pass as CSV records; native date cells are
//! rendered in ISO form so the temporal detector can evaluate them with
//! its usual gates.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};

use crate::error::{PipelineError, Result};

/// Read the first worksheet of an `.xlsx` payload as rows of strings.
pub fn read_rows(data: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook = Xlsx::new(Cursor::new(data))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(PipelineError::EmptyData)??;

    let rows = range
        .rows()
        .map(|row| row.iter().map(stringify_cell).collect())
        .collect();
    Ok(rows)
}

fn stringify_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                format!("{f}")
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => serial_to_iso(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e}"),
    }
}

/// Convert an Excel serial date to an ISO string.
///
/// Excel serials count days since 1899-12-30 (the 1900 date system with
/// its historical leap-year quirk already folded in). A whole-day serial
/// renders date-only; fractional days carry a time component.
fn serial_to_iso(serial: f64) -> String {
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return String::new();
    };
    let seconds = (serial * 86_400.0).round() as i64;
    let datetime = epoch.and_hms_opt(0, 0, 0).map(|dt| dt + Duration::seconds(seconds));
    match datetime {
        Some(dt) if seconds % 86_400 == 0 => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_scalar_cells() {
        assert_eq!(stringify_cell(&Data::Empty), "");
        assert_eq!(stringify_cell(&Data::String("x".into())), "x");
        assert_eq!(stringify_cell(&Data::Int(7)), "7");
        assert_eq!(stringify_cell(&Data::Float(2.5)), "2.5");
        assert_eq!(stringify_cell(&Data::Float(4.0)), "4");
        assert_eq!(stringify_cell(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_serial_to_iso_whole_day() {
        // 2024-01-01 is serial 45292 in the 1900 date system
        assert_eq!(serial_to_iso(45292.0), "2024-01-01");
    }

    #[test]
    fn test_serial_to_iso_with_time() {
        assert_eq!(serial_to_iso(45292.5), "2024-01-01 12:00:00");
    }

    #[test]
    fn test_invalid_workbook_bytes_error() {
        assert!(read_rows(b"definitely not a zip archive").is_err());
    }
}
