//! Insights generation boundary.
//!
//! Prose generation is a capability, not a dependency: callers hand in
//! any [`TextGenerator`] implementation (or none). When the generator is
//! absent, unconfigured or failing, the pipeline falls back to a
//! deterministic local summary instead of surfacing an error.

use thiserror::Error;

use crate::chart_spec::{ChartKind, ChartSpec};
use crate::table::Table;

/// Prompt construction includes at most this many chart contexts.
const MAX_PROMPT_SPECS: usize = 5;

/// The text-generation collaborator could not produce prose.
#[derive(Error, Debug)]
#[error("insights generator unavailable: {0}")]
pub struct InsightsUnavailable(pub String);

/// An opaque text-generation service.
pub trait TextGenerator {
    /// Generate prose for the given prompt.
    fn generate(&self, prompt: &str) -> Result<String, InsightsUnavailable>;
}

/// Produce insights text for the selected charts.
///
/// Requires both a language tag and a generator to attempt prose; in
/// every other case — and whenever the generator fails — the result is
/// the deterministic local summary, with generator failure appended as a
/// note rather than raised.
pub fn generate_insights(
    table: &Table,
    chosen: &[ChartSpec],
    language: Option<&str>,
    generator: Option<&dyn TextGenerator>,
) -> String {
    let (Some(language), Some(generator)) = (language, generator) else {
        return basic_stats(table, chosen);
    };

    match generator.generate(&build_prompt(chosen, language)) {
        Ok(text) => text.trim().to_string(),
        Err(e) => format!(
            "{}\n(Note: AI generation failed: {e})",
            basic_stats(table, chosen)
        ),
    }
}

/// Deterministic local summary: min/max/mean for the numeric target
/// column of every line or bar spec.
pub fn basic_stats(table: &Table, chosen: &[ChartSpec]) -> String {
    let mut lines = vec!["Insights (basic):".to_string()];

    for spec in chosen {
        if !matches!(spec.kind, ChartKind::Line | ChartKind::Bar) {
            continue;
        }
        let Some(y) = spec.y.as_deref() else { continue };
        let Some(column) = table.column(y) else { continue };

        let values: Vec<f64> = column.cells.iter().filter_map(|c| c.as_f64()).collect();
        if values.is_empty() {
            continue;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        lines.push(format!(
            "- {y}: min={}, max={}, mean={}",
            format_sig3(min),
            format_sig3(max),
            format_sig3(mean)
        ));
    }

    lines.join("\n")
}

fn build_prompt(chosen: &[ChartSpec], language: &str) -> String {
    let mut points = Vec::new();
    for spec in chosen.iter().take(MAX_PROMPT_SPECS) {
        points.push(format!(
            "{{kind: {}, x: {}, y: {}, category: {}}}",
            spec.kind,
            spec.x.as_deref().unwrap_or("-"),
            spec.y.as_deref().unwrap_or("-"),
            spec.category.as_deref().unwrap_or("-"),
        ));
    }

    format!(
        "You are a data analyst. Write a short bullet list of insights in {language}. \
         Be precise with numbers and trends. No fluff. \
         Charts context: [{}]. \
         If time-series present, mention peaks and trends.",
        points.join(", ")
    )
}

/// Format with three significant digits, trimming trailing zeros.
fn format_sig3(v: f64) -> String {
    if v == 0.0 || !v.is_finite() {
        return format!("{v}");
    }
    let exp = v.abs().log10().floor() as i32;
    let decimals = 2 - exp;
    if decimals <= 0 {
        let factor = 10f64.powi(-decimals);
        return format!("{}", (v / factor).round() * factor);
    }
    format!("{:.*}", decimals as usize, v)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_kind::ColumnKind;
    use crate::table::{Cell, Column};

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String, InsightsUnavailable> {
            Err(InsightsUnavailable("no credentials".to_string()))
        }
    }

    struct EchoGenerator;

    impl TextGenerator for EchoGenerator {
        fn generate(&self, prompt: &str) -> Result<String, InsightsUnavailable> {
            Ok(format!("echo: {prompt}"))
        }
    }

    fn sales_table() -> Table {
        Table {
            columns: vec![Column::new(
                "sales".into(),
                ColumnKind::Numeric,
                vec![
                    Cell::Number(10.0),
                    Cell::Number(15.0),
                    Cell::Missing,
                    Cell::Number(14.0),
                ],
            )],
        }
    }

    #[test]
    fn test_fallback_without_generator() {
        let table = sales_table();
        let specs = vec![ChartSpec::bar("region", "sales")];

        let text = generate_insights(&table, &specs, Some("English"), None);
        assert!(text.starts_with("Insights (basic):"));
        assert!(text.contains("- sales: min=10, max=15, mean=13"));
    }

    #[test]
    fn test_fallback_without_language() {
        let table = sales_table();
        let specs = vec![ChartSpec::bar("region", "sales")];

        let text = generate_insights(&table, &specs, None, Some(&EchoGenerator));
        assert!(text.starts_with("Insights (basic):"));
    }

    #[test]
    fn test_generator_failure_becomes_note() {
        let table = sales_table();
        let specs = vec![ChartSpec::line("date", "sales")];

        let text = generate_insights(&table, &specs, Some("English"), Some(&FailingGenerator));
        assert!(text.starts_with("Insights (basic):"));
        assert!(text.contains("(Note: AI generation failed:"));
        assert!(text.contains("no credentials"));
    }

    #[test]
    fn test_generator_success_passes_through() {
        let table = sales_table();
        let specs = vec![ChartSpec::line("date", "sales")];

        let text = generate_insights(&table, &specs, Some("Deutsch"), Some(&EchoGenerator));
        assert!(text.starts_with("echo:"));
        assert!(text.contains("Deutsch"));
        assert!(text.contains("line"));
    }

    #[test]
    fn test_pie_specs_are_skipped_in_stats() {
        let table = sales_table();
        let specs = vec![ChartSpec::pie("region", "sales")];

        let text = basic_stats(&table, &specs);
        assert_eq!(text, "Insights (basic):");
    }

    #[test]
    fn test_format_sig3() {
        assert_eq!(format_sig3(0.0), "0");
        assert_eq!(format_sig3(10.0), "10");
        assert_eq!(format_sig3(12.345), "12.3");
        assert_eq!(format_sig3(0.001234), "0.00123");
        assert_eq!(format_sig3(12345.0), "12300");
        assert_eq!(format_sig3(-2.567), "-2.57");
    }
}
