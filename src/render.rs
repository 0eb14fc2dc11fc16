//! Rendering adapter boundary.
//!
//! The pipeline never renders pixels. It resolves theme names and turns a
//! `(Table, ChartSpec)` pair into grouped, aggregated points; an actual
//! renderer implements [`ChartRenderer`] on top of that and returns
//! whatever opaque chart object its backend uses.

use crate::chart_spec::{Aggregate, ChartKind, ChartSpec};
use crate::table::{Cell, Table};

/// Display template plus ordered color palette resolved from a theme name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name as shown to users.
    pub name: &'static str,
    /// Backend display template identifier.
    pub template: &'static str,
    /// Ordered series colors (hex).
    pub palette: &'static [&'static str],
}

const DEFAULT_PALETTE: &[&str] = &[
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
];

/// Built-in themes. The first entry is the fallback for unknown names.
pub const THEMES: &[Theme] = &[
    Theme {
        name: "Default",
        template: "plain",
        palette: DEFAULT_PALETTE,
    },
    Theme {
        name: "Dark",
        template: "dark",
        palette: DEFAULT_PALETTE,
    },
    Theme {
        name: "Brand Blue",
        template: "plain",
        palette: &[
            "#1f77b4", "#356fa0", "#4b9cd3", "#7fb3d5", "#a9cce3", "#d4e6f1",
        ],
    },
];

/// Resolve a theme by name, falling back to the default theme.
pub fn resolve_theme(name: &str) -> &'static Theme {
    THEMES.iter().find(|t| t.name == name).unwrap_or(&THEMES[0])
}

/// Renders one chart from a table, a spec and a theme name.
///
/// The suggester and normalizer never depend on an implementation of
/// this trait; it exists so rendering backends stay swappable.
pub trait ChartRenderer {
    /// Opaque renderable chart object.
    type Chart;

    /// Render `spec` against `table` with the named theme. `None` when
    /// the spec's columns no longer resolve or produce no points.
    fn render(&self, table: &Table, spec: &ChartSpec, theme: &str) -> Option<Self::Chart>;
}

/// Grouped, aggregated data ready for a rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Points in first-seen group order.
    pub points: Vec<ChartPoint>,
    /// X-axis (or slice-key) column name.
    pub x_label: String,
    /// Y-axis column name.
    pub y_label: String,
    /// Maximum aggregated value, for scaling.
    pub max_value: f64,
    /// Minimum aggregated value, for scaling.
    pub min_value: f64,
}

/// One grouped data point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Grouping-key label.
    pub label: String,
    /// Aggregated value.
    pub value: f64,
}

/// Readability cap for discrete charts; line and scatter keep every point.
const MAX_DISCRETE_POINTS: usize = 12;

/// Group the spec's key column, aggregate its value column, and compute
/// the value range.
///
/// Group order is first-seen row order. Rows whose key or value cell is
/// missing are skipped. Returns `None` when a referenced column does not
/// resolve or no point survives.
pub fn chart_data(table: &Table, spec: &ChartSpec) -> Option<ChartData> {
    let key_name = match spec.kind {
        ChartKind::Pie => spec.category.as_deref()?,
        _ => spec.x.as_deref()?,
    };
    let value_name = spec.y.as_deref()?;

    let key_col = table.column(key_name)?;
    let value_col = table.column(value_name)?;

    // Group raw values by key label, preserving insertion order.
    let mut order: Vec<String> = Vec::new();
    let mut groups: foldhash::HashMap<String, Vec<f64>> = foldhash::HashMap::default();

    for (key, value) in key_col.cells.iter().zip(&value_col.cells) {
        if key.is_missing() {
            continue;
        }
        let Some(v) = value.as_f64() else { continue };
        let label = key.label();
        if !groups.contains_key(&label) {
            order.push(label.clone());
        }
        groups.entry(label).or_default().push(v);
    }

    if order.is_empty() {
        return None;
    }

    let limit = match spec.kind {
        ChartKind::Bar | ChartKind::Pie => MAX_DISCRETE_POINTS,
        ChartKind::Line | ChartKind::Scatter => usize::MAX,
    };

    let mut max_value = f64::NEG_INFINITY;
    let mut min_value = f64::INFINITY;
    let points: Vec<ChartPoint> = order
        .into_iter()
        .take(limit)
        .map(|label| {
            let values = &groups[&label];
            let value = apply_aggregate(spec.agg, values);
            max_value = max_value.max(value);
            min_value = min_value.min(value);
            ChartPoint { label, value }
        })
        .collect();

    Some(ChartData {
        points,
        x_label: key_name.to_string(),
        y_label: value_name.to_string(),
        max_value,
        min_value,
    })
}

fn apply_aggregate(agg: Aggregate, values: &[f64]) -> f64 {
    match agg {
        Aggregate::Sum => values.iter().sum(),
        Aggregate::Mean => {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
        Aggregate::Count => values.len() as f64,
        Aggregate::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregate::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}
