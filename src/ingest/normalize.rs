//! Normalization of raw string records into a typed [`Table`].
//!
//! Every source format funnels through this pass: header cleanup, cell
//! whitespace/null-token handling, currency-column cleanup, per-column
//! kind classification and typed cell materialization, then pruning of
//! all-missing rows and columns. Cell-level parse failures coerce to the
//! missing marker and never abort the pipeline.

use std::sync::LazyLock;

use regex::Regex;

use crate::column_kind::ColumnKind;
use crate::table::{Cell, Column, Table};

/// Floating point numbers, including scientific notation. Deliberately
/// excludes `inf`/`nan` spellings, which stay text.
static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\d+\.?\d*|\d*\.?\d+)(?:[eE][-+]?\d+)?$").expect("invalid float pattern")
});

/// Currency symbols stripped during locale-numeric cleanup.
static CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹'];

/// Check for NULL-like tokens using string matching instead of regex.
/// Hot path: called for every cell.
#[inline]
fn is_null_token(s: &str) -> bool {
    matches!(
        s,
        "" | "-"
            | "--"
            | "?"
            | "null"
            | "NULL"
            | "Null"
            | "none"
            | "NONE"
            | "None"
            | "na"
            | "NA"
            | "n/a"
            | "N/A"
            | "nan"
            | "NaN"
            | "NAN"
            | "#N/A"
            | "#VALUE!"
            | "#REF!"
            | "#DIV/0!"
    )
}

/// Check for an unsigned integer without allocating.
/// Limited to 19 digits so every accepted value fits an f64 mantissa path.
#[inline]
fn is_unsigned_int(s: &str) -> bool {
    let s = s.strip_prefix('+').unwrap_or(s);
    !s.is_empty() && s.len() <= 19 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Check for a signed (negative) integer without allocating.
#[inline]
fn is_signed_int(s: &str) -> bool {
    s.strip_prefix('-').is_some_and(|rest| {
        !rest.is_empty() && rest.len() <= 19 && rest.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Check for boolean words. Bare `1`/`0` are treated as numbers, so the
/// single-character digits are intentionally absent here.
#[inline]
fn is_boolean(s: &str) -> bool {
    match s.len() {
        1 => {
            let b = s.as_bytes()[0].to_ascii_lowercase();
            matches!(b, b'y' | b'n' | b't' | b'f')
        }
        2 => s.eq_ignore_ascii_case("on") || s.eq_ignore_ascii_case("no"),
        3 => s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("off"),
        4 => s.eq_ignore_ascii_case("true"),
        5 => s.eq_ignore_ascii_case("false"),
        _ => false,
    }
}

/// Clean one raw cell: non-breaking spaces become regular spaces, the
/// result is trimmed, and empty or NULL-like tokens become the missing
/// marker. Idempotent: cleaning a cleaned value returns it unchanged.
pub fn clean_text(raw: &str) -> Option<String> {
    let cleaned: String = if raw.contains('\u{a0}') {
        raw.replace('\u{a0}', " ")
    } else {
        raw.to_string()
    };
    let trimmed = cleaned.trim();
    if is_null_token(trimmed) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Classify one cleaned, non-missing cell value.
///
/// Date-like strings stay `Text` here: promoting a column to `Temporal`
/// is the detector's job, which applies the parse-ratio and distinct-year
/// gates a single cell cannot.
fn detect_value_kind(s: &str) -> ColumnKind {
    if is_unsigned_int(s) || is_signed_int(s) {
        return ColumnKind::Numeric;
    }
    if is_boolean(s) {
        return ColumnKind::Boolean;
    }
    if FLOAT_PATTERN.is_match(s) {
        return ColumnKind::Numeric;
    }
    ColumnKind::Text
}

/// Infer the kind of a whole column by merging per-cell kinds.
fn detect_column_kind(values: &[Option<String>]) -> ColumnKind {
    let mut merged = ColumnKind::Unknown;
    for value in values.iter().flatten() {
        merged = merged.merge(detect_value_kind(value));
        if merged == ColumnKind::Text {
            break;
        }
    }
    merged
}

/// Strip currency symbols and whitespace, then convert a comma decimal
/// separator to a dot. `"€ 1.234,56"` parses as `1234.56`; garbage yields
/// `None` and the cell becomes missing.
fn parse_currency_number(s: &str) -> Option<f64> {
    let scrubbed: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    if scrubbed.is_empty() {
        return None;
    }

    let normalized = if scrubbed.contains(',') {
        // Comma is the decimal separator; any dots are thousands marks.
        scrubbed.replace('.', "").replace(',', ".")
    } else {
        scrubbed
    };

    if FLOAT_PATTERN.is_match(&normalized) {
        normalized.parse().ok()
    } else {
        None
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.len() > 5 {
        return None;
    }
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" => Some(true),
        "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Materialize typed cells for a column of the given kind.
fn materialize_cells(kind: ColumnKind, values: Vec<Option<String>>) -> Vec<Cell> {
    values
        .into_iter()
        .map(|value| {
            let Some(s) = value else {
                return Cell::Missing;
            };
            match kind {
                ColumnKind::Numeric => s.parse().map_or(Cell::Missing, Cell::Number),
                ColumnKind::Boolean => parse_bool(&s).map_or(Cell::Missing, Cell::Bool),
                ColumnKind::Text | ColumnKind::Temporal => Cell::Text(s),
                ColumnKind::Unknown => Cell::Missing,
            }
        })
        .collect()
}

/// Trim header names, replace empty ones with positional names, and
/// mangle duplicates with a numeric suffix so names are unique.
fn normalize_headers(header: &[String]) -> Vec<String> {
    let mut seen: foldhash::HashSet<String> = foldhash::HashSet::default();
    header
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let trimmed = raw.replace('\u{a0}', " ").trim().to_string();
            let base = if trimmed.is_empty() {
                format!("column_{}", i + 1)
            } else {
                trimmed
            };

            let mut candidate = base.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) {
                suffix += 1;
                candidate = format!("{base}_{suffix}");
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// Returns true when a column name matches one of the configured
/// currency labels (case-insensitive, post-trim).
fn is_currency_label(name: &str, labels: &[String]) -> bool {
    labels.iter().any(|l| l.eq_ignore_ascii_case(name))
}

/// Build a normalized table from a header row and raw string records.
///
/// Rows shorter than the header are padded with missing cells; extra
/// trailing fields are dropped. All-missing rows and columns are pruned.
pub fn build_table(header: &[String], rows: &[Vec<String>], currency_labels: &[String]) -> Table {
    let names = normalize_headers(header);
    let num_cols = names.len();

    let mut raw_columns: Vec<Vec<Option<String>>> =
        (0..num_cols).map(|_| Vec::with_capacity(rows.len())).collect();
    for row in rows {
        for (i, raw_column) in raw_columns.iter_mut().enumerate() {
            raw_column.push(row.get(i).and_then(|s| clean_text(s)));
        }
    }

    let columns = names
        .into_iter()
        .zip(raw_columns)
        .map(|(name, values)| {
            if is_currency_label(&name, currency_labels) {
                let cells = values
                    .into_iter()
                    .map(|v| {
                        v.as_deref()
                            .and_then(parse_currency_number)
                            .map_or(Cell::Missing, Cell::Number)
                    })
                    .collect();
                Column::new(name, ColumnKind::Numeric, cells)
            } else {
                let kind = detect_column_kind(&values);
                let cells = materialize_cells(kind, values);
                Column::new(name, kind, cells)
            }
        })
        .collect();

    let mut table = Table { columns };
    table.prune_empty();
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  hello "), Some("hello".to_string()));
        assert_eq!(clean_text("a\u{a0}b"), Some("a b".to_string()));
        assert_eq!(clean_text("\u{a0}\u{a0}"), None);
        assert_eq!(clean_text(""), None);
        assert_eq!(clean_text("N/A"), None);
        assert_eq!(clean_text("NULL"), None);
    }

    #[test]
    fn test_clean_text_idempotent() {
        for raw in ["  spaced  ", "plain", "a\u{a0}b", "12.5"] {
            if let Some(once) = clean_text(raw) {
                assert_eq!(clean_text(&once), Some(once.clone()));
            }
        }
    }

    #[test]
    fn test_detect_value_kind() {
        assert_eq!(detect_value_kind("42"), ColumnKind::Numeric);
        assert_eq!(detect_value_kind("-7"), ColumnKind::Numeric);
        assert_eq!(detect_value_kind("3.14"), ColumnKind::Numeric);
        assert_eq!(detect_value_kind("1e-3"), ColumnKind::Numeric);
        assert_eq!(detect_value_kind("true"), ColumnKind::Boolean);
        assert_eq!(detect_value_kind("hello"), ColumnKind::Text);
        // Date-like strings are left to the temporal detector
        assert_eq!(detect_value_kind("2024-01-01"), ColumnKind::Text);
        assert_eq!(detect_value_kind("inf"), ColumnKind::Text);
    }

    #[test]
    fn test_parse_currency_number() {
        assert_eq!(parse_currency_number("€ 12,50"), Some(12.5));
        assert_eq!(parse_currency_number("$1,234.00"), None); // US thousands comma stays ambiguous
        assert_eq!(parse_currency_number("€1.234,56"), Some(1234.56));
        assert_eq!(parse_currency_number("9.99"), Some(9.99));
        assert_eq!(parse_currency_number("£42"), Some(42.0));
        assert_eq!(parse_currency_number("free"), None);
        assert_eq!(parse_currency_number("€"), None);
    }

    #[test]
    fn test_build_table_classifies_columns() {
        let header = s(&["name", "amount", "active"]);
        let rows = vec![
            s(&["Alice", "10", "true"]),
            s(&["Bob", "12.5", "false"]),
            s(&["Carol", "", "yes"]),
        ];
        let table = build_table(&header, &rows, &[]);

        assert_eq!(table.column("name").unwrap().kind, ColumnKind::Text);
        assert_eq!(table.column("amount").unwrap().kind, ColumnKind::Numeric);
        assert_eq!(table.column("active").unwrap().kind, ColumnKind::Boolean);
        assert_eq!(table.column("amount").unwrap().cells[2], Cell::Missing);
    }

    #[test]
    fn test_build_table_currency_cleanup() {
        let header = s(&["item", "price"]);
        let rows = vec![
            s(&["widget", "€ 12,50"]),
            s(&["gadget", "9.99"]),
            s(&["mystery", "call us"]),
        ];
        let labels = vec!["price".to_string()];
        let table = build_table(&header, &rows, &labels);

        let price = table.column("price").unwrap();
        assert_eq!(price.kind, ColumnKind::Numeric);
        assert_eq!(price.cells[0], Cell::Number(12.5));
        assert_eq!(price.cells[1], Cell::Number(9.99));
        assert_eq!(price.cells[2], Cell::Missing);
    }

    #[test]
    fn test_build_table_prunes_empty() {
        let header = s(&["a", "b", "blank"]);
        let rows = vec![
            s(&["1", "x", ""]),
            s(&["", "", ""]),
            s(&["3", "y", "  "]),
        ];
        let table = build_table(&header, &rows, &[]);

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_headers_unique_after_trim() {
        let header = s(&[" value ", "value", "", "value"]);
        let names = normalize_headers(&header);
        assert_eq!(names, vec!["value", "value_2", "column_3", "value_3"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let header = s(&["a", "b", "c"]);
        let rows = vec![s(&["1", "2", "3"]), s(&["4"])];
        let table = build_table(&header, &rows, &[]);

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column("b").unwrap().cells[1], Cell::Missing);
    }

    #[test]
    fn test_mixed_column_becomes_text() {
        let header = s(&["v"]);
        let rows = vec![s(&["100"]), s(&["hello"]), s(&["300"])];
        let table = build_table(&header, &rows, &[]);

        let v = table.column("v").unwrap();
        assert_eq!(v.kind, ColumnKind::Text);
        assert_eq!(v.cells[0], Cell::Text("100".into()));
    }
}
