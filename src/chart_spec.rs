//! Chart specification value objects.

use std::fmt;

/// The visualization family a spec recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Line => write!(f, "line"),
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Pie => write!(f, "pie"),
            ChartKind::Scatter => write!(f, "scatter"),
        }
    }
}

/// Reduction applied when multiple rows share a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Aggregate {
    #[default]
    Sum,
    Mean,
    Count,
    Min,
    Max,
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregate::Sum => write!(f, "sum"),
            Aggregate::Mean => write!(f, "mean"),
            Aggregate::Count => write!(f, "count"),
            Aggregate::Min => write!(f, "min"),
            Aggregate::Max => write!(f, "max"),
        }
    }
}

/// One recommended visualization.
///
/// A spec is an immutable value object, not a live view: it references
/// table columns by name, and consumers must re-resolve those names
/// against the current table. Every name referenced by a spec produced
/// by [`crate::suggester::suggest_charts`] exists in the table it was
/// derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Visualization family.
    pub kind: ChartKind,
    /// X-axis column (line/bar/scatter).
    pub x: Option<String>,
    /// Y-axis / value column.
    pub y: Option<String>,
    /// Slice-key column (pie).
    pub category: Option<String>,
    /// Grouping reduction, `Sum` unless stated otherwise.
    pub agg: Aggregate,
    /// Human-readable label.
    pub title: Option<String>,
}

impl ChartSpec {
    /// Line chart of `y` against `x`.
    pub fn line(x: &str, y: &str) -> Self {
        Self {
            kind: ChartKind::Line,
            x: Some(x.to_string()),
            y: Some(y.to_string()),
            category: None,
            agg: Aggregate::Sum,
            title: Some(format!("{y} over time")),
        }
    }

    /// Bar chart of `y` by `x`.
    pub fn bar(x: &str, y: &str) -> Self {
        Self {
            kind: ChartKind::Bar,
            x: Some(x.to_string()),
            y: Some(y.to_string()),
            category: None,
            agg: Aggregate::Sum,
            title: Some(format!("{y} by {x}")),
        }
    }

    /// Pie chart of `y` shares by `category`.
    pub fn pie(category: &str, y: &str) -> Self {
        Self {
            kind: ChartKind::Pie,
            x: None,
            y: Some(y.to_string()),
            category: Some(category.to_string()),
            agg: Aggregate::Sum,
            title: Some(format!("Share of {y} by {category}")),
        }
    }

    /// Column names this spec references, in x/y/category order.
    pub fn referenced_columns(&self) -> Vec<&str> {
        [self.x.as_deref(), self.y.as_deref(), self.category.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}
